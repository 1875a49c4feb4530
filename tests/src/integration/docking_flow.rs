//! Docking campaign lifecycle and epoch settlement.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use hx_mining::ports::bank::BankLedger;
    use hx_mining::ports::stores::DockingJobStore;
    use hx_mining::{
        ClaimDockingJob, CreateDockingJob, DockingStatus, Event, MiningError, SubmitDockingResult,
        BASE_EMISSION_PER_MINUTE,
    };
    use shared_types::BlockCtx;

    /// Whole-minute chain start so epoch arithmetic reads cleanly.
    const START_SECS: i64 = 1_700_000_040;

    fn at_minute(offset: i64) -> BlockCtx {
        BlockCtx::new(1 + offset as u64 * 30, START_SECS + offset * 60)
    }

    fn create_background(svc: &mut TestService, ctx: BlockCtx, total_ligands: u64) -> String {
        svc.create_docking_job(
            ctx,
            CreateDockingJob {
                creator: CUSTOMER.into(),
                target_hash: "ab".repeat(32),
                protein_pdb: "ATOM      1  N   MET A   1".into(),
                total_ligands,
                center_x_milli: 12_500,
                center_y_milli: -3_000,
                center_z_milli: 0,
                reward: 0,
                is_background: true,
            },
        )
        .expect("create_docking_job")
    }

    fn dock(
        svc: &mut TestService,
        ctx: BlockCtx,
        job_id: &str,
        miner: &str,
        ligand_id: &str,
        bonds: i32,
    ) {
        svc.submit_docking_result(
            ctx,
            SubmitDockingResult {
                miner: miner.into(),
                job_id: job_id.into(),
                ligand_id: ligand_id.into(),
                ligand_smiles: "CCO".into(),
                binding_score_milli: -5_000,
                rotatable_bonds: bonds,
            },
        )
        .expect("submit_docking_result");
    }

    #[test]
    fn test_claim_then_submit_lifecycle() {
        let mut svc = service();
        let t0 = at_minute(0);
        let job_id = create_background(&mut svc, t0, 200);

        let assignment = svc
            .claim_docking_job(
                t0,
                ClaimDockingJob {
                    miner: MINER_1.into(),
                    job_id: None,
                    batch_size: 25,
                },
            )
            .expect("claim against the active campaign");
        assert_eq!(assignment.job_id, job_id);
        assert_eq!((assignment.start_ligand, assignment.end_ligand), (0, 25));
        assert_eq!(assignment.search_box.center_x_milli, 12_500);

        let claim = svc
            .docking_claim(MINER_1, &job_id)
            .unwrap()
            .expect("lease should be recorded");
        assert_eq!((claim.start_ligand, claim.end_ligand), (0, 25));

        dock(&mut svc, t0, &job_id, MINER_1, "lig_0", 5);
        let job = svc.docking_job(&job_id).unwrap();
        assert_eq!(job.docked_count, 1);
        assert_eq!(svc.miner_docking_rewards(MINER_1).unwrap(), 1_000);
    }

    #[test]
    fn test_equal_work_three_strategies_equal_pay() {
        let mut svc = service();
        // Fund the module as the emission scheduler would; the first
        // end_block pins the epoch start at minute 0.
        svc.begin_block(at_minute(0));
        svc.end_block(at_minute(0));
        svc.begin_block(at_minute(20)); // 20 minutes minted into escrow

        let t = at_minute(20);
        let job_id = create_background(&mut svc, t, 10_000);

        // 10 x 5-bond, 5 x 10-bond, 20 x 0-bond: 10_000 weighted shares
        // each, by three different strategies.
        for i in 0..10 {
            dock(&mut svc, t, &job_id, MINER_1, &format!("m1_{i}"), 5);
        }
        for i in 0..5 {
            dock(&mut svc, t, &job_id, MINER_2, &format!("m2_{i}"), 10);
        }
        for i in 0..20 {
            dock(&mut svc, t, &job_id, MINER_3, &format!("m3_{i}"), 0);
        }
        let status = svc.epoch_status();
        assert_eq!(status.total_shares, 30_000);
        assert_eq!(status.participant_count, 3);
        assert_eq!(status.epoch_number, 1);

        // Rollover lands 11 minutes after the epoch started.
        svc.end_block(at_minute(31));

        let epoch_emission = BASE_EMISSION_PER_MINUTE * 10;
        let third = epoch_emission / 3;
        for miner in [MINER_1, MINER_2, MINER_3] {
            let balance = svc.bank().balance_of(&addr(miner));
            assert!(
                balance.abs_diff(third) <= 1,
                "{miner} received {balance}, expected ~{third}"
            );
        }

        // Accumulators are exactly zero and the epoch advanced by one.
        let status = svc.epoch_status();
        assert_eq!(status.epoch_number, 2);
        assert_eq!(status.total_shares, 0);
        assert_eq!(status.participant_count, 0);

        let events = svc.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            Event::DockingEpochEnd(p) if p.epoch == 1 && p.total_shares == 30_000
        )));
        let payouts = events
            .iter()
            .filter(|e| matches!(e, Event::DockingRewardPaid(_)))
            .count();
        assert_eq!(payouts, 3);
    }

    #[test]
    fn test_epoch_rollover_waits_for_window() {
        let mut svc = service();
        svc.begin_block(at_minute(0));
        svc.end_block(at_minute(0));
        let job_id = create_background(&mut svc, at_minute(0), 100);
        dock(&mut svc, at_minute(0), &job_id, MINER_1, "lig_0", 5);

        svc.end_block(at_minute(9));
        assert_eq!(svc.epoch_status().epoch_number, 1);
        assert_eq!(svc.epoch_status().total_shares, 1_000);

        svc.end_block(at_minute(10));
        assert_eq!(svc.epoch_status().epoch_number, 2);
    }

    #[test]
    fn test_completion_flips_status_exactly_at_total() {
        let mut svc = service();
        let t = at_minute(0);
        let job_id = create_background(&mut svc, t, 3);

        for i in 0..3 {
            assert_eq!(
                svc.docking_job(&job_id).unwrap().status,
                DockingStatus::Active
            );
            dock(&mut svc, t, &job_id, MINER_1, &format!("lig_{i}"), 3);
        }

        let job = svc.docking_job(&job_id).unwrap();
        assert_eq!(job.status, DockingStatus::Completed);
        assert_eq!(job.docked_count, job.total_ligands);

        let err = svc
            .submit_docking_result(
                t,
                SubmitDockingResult {
                    miner: MINER_1.into(),
                    job_id,
                    ligand_id: "lig_overflow".into(),
                    ligand_smiles: "C".into(),
                    binding_score_milli: -9_000,
                    rotatable_bonds: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(err, MiningError::JobNotActive { .. }));
    }

    #[test]
    fn test_paid_campaign_requires_funds() {
        let mut svc = service_with_balances(&[(CUSTOMER, 1_000)]);
        let err = svc
            .create_docking_job(
                at_minute(0),
                CreateDockingJob {
                    creator: CUSTOMER.into(),
                    target_hash: "ab".repeat(32),
                    protein_pdb: String::new(),
                    total_ligands: 100,
                    center_x_milli: 0,
                    center_y_milli: 0,
                    center_z_milli: 0,
                    reward: 5_000_000,
                    is_background: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, MiningError::Bank(_)));
        assert!(svc.state().active_docking_job_id().is_none());
    }

    #[test]
    fn test_epoch_weights_follow_bond_table() {
        let mut svc = service();
        let t = at_minute(0);
        let job_id = create_background(&mut svc, t, 100);

        dock(&mut svc, t, &job_id, MINER_1, "simple", 0);
        dock(&mut svc, t, &job_id, MINER_2, "complex", 13);

        assert_eq!(svc.epoch_status().total_shares, 500 + 3_000);
    }
}
