//! Emission schedule behavior through the block tick.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use hx_mining::ports::bank::BankLedger;
    use hx_mining::{
        ClaimRewards, PostJob, SubmitProof, BASE_EMISSION_PER_MINUTE, STAGE_DURATION_MINUTES,
    };
    use shared_types::BlockCtx;

    const START_SECS: i64 = 1_700_000_040;

    fn at_minute(offset: i64) -> BlockCtx {
        BlockCtx::new(1 + offset as u64 * 30, START_SECS + offset * 60)
    }

    #[test]
    fn test_rate_walks_the_halving_table() {
        let mut svc = service();
        svc.begin_block(at_minute(0));

        let expectations = [
            (0, 1, BASE_EMISSION_PER_MINUTE),
            (STAGE_DURATION_MINUTES, 2, BASE_EMISSION_PER_MINUTE / 2),
            (STAGE_DURATION_MINUTES * 2, 3, BASE_EMISSION_PER_MINUTE / 4),
            (STAGE_DURATION_MINUTES * 7, 8, BASE_EMISSION_PER_MINUTE * 15 / 1000),
            // The floor is perpetual.
            (STAGE_DURATION_MINUTES * 40, 8, BASE_EMISSION_PER_MINUTE * 15 / 1000),
        ];
        for (minute, stage, rate) in expectations {
            let status = svc.emission_status(at_minute(minute));
            assert_eq!(status.stage, stage, "stage at minute {minute}");
            assert_eq!(status.rate_per_minute, rate, "rate at minute {minute}");
        }
    }

    #[test]
    fn test_escrow_accrues_once_per_minute() {
        let mut svc = service();
        svc.begin_block(at_minute(0));

        // 30 two-second blocks inside the same minute mint nothing new.
        for block_in_minute in 1..30u64 {
            svc.begin_block(BlockCtx::new(
                1 + block_in_minute,
                START_SECS + block_in_minute as i64 * 2,
            ));
        }
        assert_eq!(svc.emission_status(at_minute(0)).escrow, 0);

        svc.begin_block(at_minute(1));
        assert_eq!(
            svc.emission_status(at_minute(1)).escrow,
            BASE_EMISSION_PER_MINUTE
        );
    }

    #[test]
    fn test_slow_blocks_catch_up_in_one_step() {
        let mut svc = service();
        svc.begin_block(at_minute(0));
        svc.begin_block(at_minute(7));

        assert_eq!(
            svc.emission_status(at_minute(7)).escrow,
            7 * BASE_EMISSION_PER_MINUTE
        );
        assert_eq!(
            svc.bank().module_balance("mining"),
            7 * BASE_EMISSION_PER_MINUTE
        );
    }

    #[test]
    fn test_stepwise_and_catch_up_accrual_agree() {
        use rand::{Rng, SeedableRng};

        // One node ticking every few minutes and one node that sleeps
        // through the whole window must mint the same escrow.
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut stepping = service();
        let mut sleeping = service();
        stepping.begin_block(at_minute(0));
        sleeping.begin_block(at_minute(0));

        let mut minute = 0i64;
        for _ in 0..20 {
            minute += rng.gen_range(1..=7);
            stepping.begin_block(at_minute(minute));
        }
        sleeping.begin_block(at_minute(minute));

        assert_eq!(
            stepping.emission_status(at_minute(minute)).escrow,
            sleeping.emission_status(at_minute(minute)).escrow,
        );
        assert_eq!(
            stepping.emission_status(at_minute(minute)).escrow,
            minute as u64 * BASE_EMISSION_PER_MINUTE
        );
    }

    #[test]
    fn test_emission_claim_capped_at_escrow() {
        let mut svc = service();
        svc.begin_block(at_minute(0));

        let t = at_minute(0);
        let job_id = svc
            .post_job(
                t,
                PostJob {
                    customer: CUSTOMER.into(),
                    problem_type: "ising".into(),
                    problem_data: vec![],
                    problem_hash: "01".repeat(32),
                    threshold: 1_000,
                    reward: 1_000_000,
                    duration_blocks: 40_000,
                },
            )
            .unwrap();
        svc.submit_proof(
            t,
            SubmitProof {
                miner: MINER_1.into(),
                job_id: job_id.clone(),
                energy: -500,
                proof: vec![1],
                proof_type: "nova".into(),
                solution_hash: "02".repeat(32),
            },
        )
        .unwrap();

        // One minute escrowed, but the job is 1000 minutes old at claim
        // time: the emission cut clamps to escrow instead of erroring.
        svc.begin_block(at_minute(1));
        let escrow_before = svc.emission_status(at_minute(1)).escrow;
        assert_eq!(escrow_before, BASE_EMISSION_PER_MINUTE);

        let claim_ctx = at_minute(1_000);
        let paid = svc
            .claim_rewards(
                claim_ctx,
                ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id,
                },
            )
            .unwrap();

        assert_eq!(paid, 784_000 + escrow_before * 80 / 100);
        assert_eq!(svc.emission_status(claim_ctx).escrow, 0);
    }
}
