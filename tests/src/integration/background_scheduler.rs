//! Background scheduler behavior: synthesis, queues, and the two expiry
//! paths staying in agreement.

#[cfg(test)]
mod tests {
    use crate::integration::*;
    use hx_mining::ports::stores::SchedulerStore;
    use hx_mining::{Event, JobStatus, MiningError, SubmitProof, SubmitPublicJob};
    use shared_types::BlockCtx;

    fn prove_current(svc: &mut TestService, ctx: BlockCtx) -> Result<i64, MiningError> {
        let job_id = svc.state().current_job_id().expect("background job");
        let threshold = svc.job(&job_id).unwrap().threshold;
        svc.submit_proof(
            ctx,
            SubmitProof {
                miner: MINER_1.into(),
                job_id,
                energy: threshold - 10,
                proof: vec![1],
                proof_type: "nova".into(),
                solution_hash: "02".repeat(32),
            },
        )
    }

    #[test]
    fn test_chain_start_poses_synthetic_work() {
        let mut svc = service();
        svc.begin_block(block(1));

        let job_id = svc.state().current_job_id().unwrap();
        let job = svc.job(&job_id).unwrap();
        assert!(job.is_background);
        assert_eq!(job.status, JobStatus::Active);
        assert_eq!(job.problem_type, "ising_synthetic");
        // 64x64 couplings at the starting size.
        assert_eq!(job.problem_data.len(), 64 * 64);

        let events = svc.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SyntheticJobGenerated(p) if p.problem_size == 64)));
    }

    #[test]
    fn test_lazy_and_eager_expiry_agree() {
        let mut svc = service();
        svc.begin_block(block(1));
        let job_id = svc.state().current_job_id().unwrap();
        let deadline = svc.job(&job_id).unwrap().deadline_height;

        // Lazy path: past the deadline the proof is rejected even though
        // the stored status still reads Active.
        let late = block(deadline + 1);
        let err = prove_current(&mut svc, late).unwrap_err();
        assert!(matches!(err, MiningError::JobExpired { .. }));
        assert_eq!(svc.job(&job_id).unwrap().status, JobStatus::Active);

        // Eager path: the next scheduler tick writes the terminal status
        // and poses a replacement. Both paths reject the same heights.
        svc.begin_block(late);
        assert_eq!(svc.job(&job_id).unwrap().status, JobStatus::Expired);
        let replacement = svc.state().current_job_id().unwrap();
        assert_ne!(replacement, job_id);

        let err = svc
            .submit_proof(
                late,
                SubmitProof {
                    miner: MINER_1.into(),
                    job_id: job_id.clone(),
                    energy: -100,
                    proof: vec![1],
                    proof_type: "nova".into(),
                    solution_hash: "02".repeat(32),
                },
            )
            .unwrap_err();
        assert!(matches!(err, MiningError::JobNotActive { .. }));

        let events = svc.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::JobExpired(p) if p.job_id == job_id)));
    }

    #[test]
    fn test_queued_public_jobs_run_before_synthesis() {
        let mut svc = service();
        let queued = svc
            .submit_public_job(
                block(1),
                SubmitPublicJob {
                    submitter: CUSTOMER.into(),
                    problem_type: "graph_optimization".into(),
                    problem_data: vec![3; 8],
                    problem_hash: "cd".repeat(32),
                    threshold: -64,
                },
            )
            .unwrap();

        svc.begin_block(block(2));
        assert_eq!(svc.state().current_job_id().unwrap(), queued);
        assert_eq!(svc.job(&queued).unwrap().status, JobStatus::Active);
        assert_eq!(svc.state().background_job_count(), 0);

        // Solving it falls back to synthesis next tick.
        prove_current(&mut svc, block(3)).unwrap();
        assert_eq!(svc.job(&queued).unwrap().status, JobStatus::Completed);
        svc.begin_block(block(4));
        let next = svc.state().current_job_id().unwrap();
        assert!(next.starts_with("sys_"));
    }

    #[test]
    fn test_queue_draw_is_deterministic() {
        let build = || {
            let mut svc = service();
            for n in 0..5u8 {
                svc.submit_public_job(
                    block(1),
                    SubmitPublicJob {
                        submitter: CUSTOMER.into(),
                        problem_type: "scheduling".into(),
                        problem_data: vec![n],
                        problem_hash: format!("{n:02x}").repeat(32),
                        threshold: -10,
                    },
                )
                .unwrap();
            }
            svc.begin_block(block(2));
            svc.state().current_job_id().unwrap()
        };

        // Same transaction log, same draw.
        assert_eq!(build(), build());
    }

    #[test]
    fn test_background_jobs_pay_emission_only() {
        let mut svc = service();
        svc.begin_block(block(1));
        let job_id = svc.state().current_job_id().unwrap();

        prove_current(&mut svc, block(2)).unwrap();

        // Zero customer reward: the claim is pure emission, and with an
        // empty escrow it pays nothing at all.
        let paid = svc
            .claim_rewards(
                block(3),
                hx_mining::ClaimRewards {
                    claimer: MINER_1.into(),
                    job_id,
                },
            )
            .unwrap();
        assert_eq!(paid, 0);
    }
}
