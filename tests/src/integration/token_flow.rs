//! Full token flow: post, prove, claim. Covers the posting-fee burn,
//! the miner/validator split, and the share conservation law under
//! arbitrary submission interleavings.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use hx_mining::ports::bank::BankLedger;
    use hx_mining::{ClaimRewards, Event, MiningError, PostJob, SubmitProof};
    use proptest::prelude::*;
    use shared_types::{content_hash, BlockCtx};

    fn post(svc: &mut TestService, ctx: BlockCtx, reward: u64) -> String {
        svc.post_job(
            ctx,
            PostJob {
                customer: CUSTOMER.into(),
                problem_type: "ising".into(),
                problem_data: vec![7; 16],
                problem_hash: content_hash(&[7; 16]),
                threshold: 1_000,
                reward,
                duration_blocks: 1_000,
            },
        )
        .expect("post_job")
    }

    fn prove(svc: &mut TestService, ctx: BlockCtx, job_id: &str, miner: &str, energy: i64) -> i64 {
        svc.submit_proof(
            ctx,
            SubmitProof {
                miner: miner.into(),
                job_id: job_id.into(),
                energy,
                proof: vec![0xde, 0xad, 0xbe, 0xef],
                proof_type: "nova".into(),
                solution_hash: "02".repeat(32),
            },
        )
        .expect("submit_proof")
    }

    #[test]
    fn test_full_token_flow_burn_and_split() {
        let mut svc = service();
        let ctx = block(1);

        let job_id = post(&mut svc, ctx, 1_000_000);
        prove(&mut svc, ctx, &job_id, MINER_1, -500);
        let paid = svc
            .claim_rewards(
                ctx,
                ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id: job_id.clone(),
                },
            )
            .expect("claim_rewards");

        // 1M gross: 20K burned, 980K escrowed; sole solver takes 80%,
        // the validator pool holds 20%.
        assert_eq!(paid, 784_000);
        assert_eq!(svc.bank().balance_of(&addr(CUSTOMER)), 9_000_000);
        assert_eq!(svc.bank().balance_of(&addr(MINER_1)), 784_000);
        assert_eq!(svc.bank().module_balance("mining"), 196_000);
        assert_eq!(svc.validator_reward_pool(), 196_000);

        // Supply conservation: only the posting fee left circulation.
        let circulating = svc.bank().total_supply();
        assert_eq!(10_000_000 - circulating, 20_000);
    }

    #[test]
    fn test_competition_splits_reward_by_shares() {
        let mut svc = service_with_balances(&[(CUSTOMER, 10_000_000)]);
        let ctx = block(1);

        let job_id = post(&mut svc, ctx, 1_000_000);
        // Miner 1 bootstraps with 500 shares, miner 2 improves by 200.
        assert_eq!(prove(&mut svc, ctx, &job_id, MINER_1, -500), 500);
        assert_eq!(prove(&mut svc, ctx, &job_id, MINER_2, -700), 200);

        let paid_1 = svc
            .claim_rewards(
                ctx,
                ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id: job_id.clone(),
                },
            )
            .unwrap();
        let paid_2 = svc
            .claim_rewards(
                ctx,
                ClaimRewards {
                    claimer: MINER_2.into(),
                    job_id,
                },
            )
            .unwrap();

        // 980_000 * 500/700 = 700_000; 980_000 * 200/700 = 280_000.
        assert_eq!(paid_1, 700_000 * 80 / 100);
        assert_eq!(paid_2, 280_000 * 80 / 100);
    }

    #[test]
    fn test_validator_pool_accumulates_across_jobs() {
        let mut svc = service_with_balances(&[(CUSTOMER, 100_000_000)]);
        assert_eq!(svc.validator_reward_pool(), 0);

        for n in 1..=3u64 {
            let ctx = block(n);
            let job_id = post(&mut svc, ctx, 1_000_000);
            prove(&mut svc, ctx, &job_id, MINER_1, -500);
            svc.claim_rewards(
                ctx,
                ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id,
                },
            )
            .unwrap();
        }

        // Three jobs, 196K validator cut each.
        assert_eq!(svc.validator_reward_pool(), 588_000);
    }

    #[test]
    fn test_claim_includes_accrued_emission() {
        let mut svc = service();
        let start = 1_700_000_040; // whole minute

        // Baseline tick, then two minutes pass before the next block.
        svc.begin_block(BlockCtx::new(1, start));
        let t2 = BlockCtx::new(60, start + 120);
        svc.begin_block(t2);

        let base = 35_950_000_000u64;
        let escrow = svc.emission_status(t2).escrow;
        assert_eq!(escrow, 2 * base);

        let job_id = post(&mut svc, t2, 1_000_000);
        prove(&mut svc, t2, &job_id, MINER_1, -500);

        // Claim one minute later: emission cut is rate * 1 minute.
        let t3 = BlockCtx::new(90, start + 180);
        svc.begin_block(t3);
        let paid = svc
            .claim_rewards(
                t3,
                ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id,
                },
            )
            .unwrap();

        assert_eq!(paid, 784_000 + base * 80 / 100);
        assert_eq!(svc.validator_reward_pool(), 196_000 + base * 20 / 100);
        // One minute of emission left escrow; two remained (3 minted).
        assert_eq!(svc.emission_status(t3).escrow, 2 * base);

        let events = svc.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::EmissionRewardClaimed(p) if p.emission_reward == base)));
    }

    #[test]
    fn test_failed_claim_leaves_no_trace() {
        let mut svc = service();
        let ctx = block(1);
        let job_id = post(&mut svc, ctx, 1_000_000);
        prove(&mut svc, ctx, &job_id, MINER_1, -500);

        let err = svc
            .claim_rewards(
                ctx,
                ClaimRewards {
                    claimer: MINER_2.into(),
                    job_id: job_id.clone(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, MiningError::NoShares { .. }));

        // The real claimant is untouched by the failed attempt.
        assert_eq!(svc.shares_of(MINER_1, &job_id).unwrap(), 500);
        assert_eq!(svc.validator_reward_pool(), 0);
        assert_eq!(svc.bank().module_balance("mining"), 980_000);
    }

    proptest! {
        /// Conservation law: however submissions interleave, a job's
        /// `total_shares` equals the sum of every per-miner balance.
        #[test]
        fn prop_total_shares_equals_sum_of_balances(
            energies in prop::collection::vec((-1_000i64..0, 0usize..3), 1..40)
        ) {
            let mut svc = service_with_balances(&[(CUSTOMER, 10_000_000)]);
            let ctx = block(1);
            let miners = [MINER_1, MINER_2, MINER_3];

            let job_id = svc.post_job(
                ctx,
                PostJob {
                    customer: CUSTOMER.into(),
                    problem_type: "ising".into(),
                    problem_data: vec![],
                    problem_hash: "01".repeat(32),
                    threshold: 0,
                    reward: 1_000_000,
                    duration_blocks: 1_000,
                },
            ).unwrap();

            for (energy, miner_idx) in energies {
                // Worse-or-equal submissions legitimately earn zero.
                let _ = svc.submit_proof(
                    ctx,
                    SubmitProof {
                        miner: miners[miner_idx].into(),
                        job_id: job_id.clone(),
                        energy,
                        proof: vec![1],
                        proof_type: "nova".into(),
                        solution_hash: "02".repeat(32),
                    },
                );
            }

            let job = svc.job(&job_id).unwrap();
            let sum: i64 = miners
                .iter()
                .map(|m| svc.shares_of(m, &job_id).unwrap())
                .sum();
            prop_assert_eq!(job.total_shares, sum);
            prop_assert!(job.total_shares >= 0);
        }
    }
}
