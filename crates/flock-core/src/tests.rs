#[cfg(test)]
mod tests {
    use glam::IVec2;

    use crate::enums::*;
    use crate::events::EpisodeEvent;
    use crate::ledger::{EpisodeReport, FitnessLedger};
    use crate::mask::{MaskError, OpacityMask, SpriteSet};
    use crate::policy::*;
    use crate::state::EpisodeSnapshot;
    use crate::tuning::{ConfigError, Tuning};
    use crate::types::{GenomeId, SimTime};

    fn square(size: u32) -> OpacityMask {
        OpacityMask::from_fn(size, size, |_, _| true).unwrap()
    }

    // ---- Tuning ----

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_tuning_rejects_bad_values() {
        let zero_rate = Tuning {
            tick_rate: 0,
            ..Default::default()
        };
        assert_eq!(zero_rate.validate(), Err(ConfigError::ZeroTickRate));

        let negative_gap = Tuning {
            gap_size: -10.0,
            ..Default::default()
        };
        assert_eq!(
            negative_gap.validate(),
            Err(ConfigError::NotPositive {
                field: "gap_size",
                value: -10.0
            })
        );

        let nan_gravity = Tuning {
            gravity: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_gravity.validate(),
            Err(ConfigError::NotFinite {
                field: "gravity",
                ..
            })
        ));

        let empty_range = Tuning {
            gap_center_min: 300,
            gap_center_max: 300,
            ..Default::default()
        };
        assert_eq!(
            empty_range.validate(),
            Err(ConfigError::EmptyGapRange { min: 300, max: 300 })
        );

        let reward_sign = Tuning {
            boundary_penalty: -100.0,
            ..Default::default()
        };
        assert!(matches!(
            reward_sign.validate(),
            Err(ConfigError::Negative {
                field: "boundary_penalty",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_tuning_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gap_size": 150.0 }"#).unwrap();
        assert_eq!(tuning.gap_size, 150.0);
        assert_eq!(tuning.tick_rate, 30);
        assert_eq!(tuning.jump_velocity, -10.5);
    }

    #[test]
    fn test_dt_matches_tick_rate() {
        let tuning = Tuning::default();
        let mut time = SimTime::default();
        for _ in 0..tuning.tick_rate {
            time.advance(tuning.dt());
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    // ---- Masks ----

    #[test]
    fn test_from_alpha_threshold() {
        let alpha = [0, 127, 128, 255];
        let mask = OpacityMask::from_alpha(2, 2, &alpha, 127).unwrap();
        assert!(!mask.get(0, 0));
        assert!(!mask.get(1, 0), "alpha equal to the threshold is transparent");
        assert!(mask.get(0, 1));
        assert!(mask.get(1, 1));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_from_alpha_rejects_wrong_length() {
        assert_eq!(
            OpacityMask::from_alpha(3, 3, &[255; 8], 127),
            Err(MaskError::AlphaLength {
                expected: 9,
                actual: 8
            })
        );
        assert_eq!(
            OpacityMask::from_fn(0, 4, |_, _| true),
            Err(MaskError::ZeroSized {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_overlap_adjacent_and_touching() {
        let a = square(10);
        let b = square(10);
        // Side by side with no shared column.
        assert_eq!(a.overlap(&b, IVec2::new(10, 0)), None);
        // One shared column.
        assert_eq!(a.overlap(&b, IVec2::new(9, 0)), Some(IVec2::new(9, 0)));
        // Other mask up and to the left.
        assert_eq!(a.overlap(&b, IVec2::new(-9, -9)), Some(IVec2::new(0, 0)));
        assert_eq!(a.overlap(&b, IVec2::new(-10, 0)), None);
    }

    #[test]
    fn test_overlap_ignores_transparent_margins() {
        // Opaque only in the bottom-right corner pixel.
        let corner = OpacityMask::from_fn(8, 8, |x, y| x == 7 && y == 7).unwrap();
        // Opaque only in the top-left corner pixel.
        let other = OpacityMask::from_fn(8, 8, |x, y| x == 0 && y == 0).unwrap();

        // Bounding boxes overlap heavily but the opaque pixels do not meet.
        assert!(!corner.overlaps(&other, IVec2::new(2, 2)));
        // Exactly aligned on the single opaque pixel.
        assert_eq!(corner.overlap(&other, IVec2::new(7, 7)), Some(IVec2::new(7, 7)));
    }

    #[test]
    fn test_overlap_across_word_boundary() {
        let wide = OpacityMask::from_fn(150, 1, |x, _| x == 130).unwrap();
        let dot = OpacityMask::from_fn(1, 1, |_, _| true).unwrap();
        assert!(wide.get(130, 0));
        assert!(!wide.get(129, 0));
        assert_eq!(wide.overlap(&dot, IVec2::new(130, 0)), Some(IVec2::new(130, 0)));
        assert_eq!(wide.overlap(&dot, IVec2::new(129, 0)), None);

        // Shifted windows straddling two words.
        let bar = OpacityMask::from_fn(100, 1, |x, _| x >= 60).unwrap();
        assert_eq!(wide.overlap(&bar, IVec2::new(0, 0)), None);
        assert_eq!(wide.overlap(&bar, IVec2::new(40, 0)), Some(IVec2::new(130, 0)));
    }

    #[test]
    fn test_flip_vertical() {
        let mask = OpacityMask::from_fn(3, 4, |_, y| y == 0).unwrap();
        let flipped = mask.flip_vertical();
        assert!(flipped.get(1, 3));
        assert!(!flipped.get(1, 0));
        assert_eq!(flipped.count(), mask.count());
    }

    #[test]
    fn test_sprite_set_rejects_mismatched_frames() {
        let result = SpriteSet::new(vec![square(4), square(5)], square(8));
        assert_eq!(
            result,
            Err(MaskError::FrameSizeMismatch {
                index: 1,
                expected: (4, 4),
                actual: (5, 5)
            })
        );
        assert_eq!(SpriteSet::new(Vec::new(), square(8)), Err(MaskError::NoFrames));
    }

    #[test]
    fn test_procedural_sprites() {
        let sprites = SpriteSet::procedural();
        assert_eq!(sprites.frame_count(), 3);
        assert_eq!((sprites.agent_width(), sprites.agent_height()), (68, 48));
        assert_eq!((sprites.barrier_width(), sprites.barrier_height()), (104, 640));

        // The bottom barrier's lip is at the top, the top barrier's at the bottom.
        assert!(sprites.barrier_bottom().get(0, 0));
        assert!(!sprites.barrier_bottom().get(0, 639));
        assert!(sprites.barrier_top().get(0, 639));
        assert!(!sprites.barrier_top().get(0, 0));

        // Sprite corners are transparent.
        let frame = sprites.agent_frame(0);
        assert!(!frame.get(0, 0));
        assert!(!frame.get(67, 47));
        assert!(frame.get(34, 24));
        assert_ne!(sprites.agent_frame(0), sprites.agent_frame(2));
        assert_eq!(sprites.agent_frame(3), sprites.agent_frame(0));
    }

    // ---- Policies ----

    #[test]
    fn test_wants_jump_threshold() {
        assert_eq!(wants_jump(&[0.6], 0.5), Ok(true));
        assert_eq!(wants_jump(&[0.5], 0.5), Ok(false));
        assert_eq!(wants_jump(&[0.4, 0.9], 0.5), Ok(false));
        assert_eq!(wants_jump(&[], 0.5), Err(PolicyError::EmptyOutput));
        assert!(matches!(
            wants_jump(&[f64::NAN], 0.5),
            Err(PolicyError::NonFinite(_))
        ));
    }

    #[test]
    fn test_builtin_policies() {
        let obs = Observation {
            y: 320.0,
            gap_distance: 40.0,
            lookahead: 200.0,
        };
        assert_eq!(ConstantPolicy(0.7).decide(&obs), Ok(vec![0.7]));
        assert_eq!(HoverPolicy { target_y: 300.0 }.decide(&obs), Ok(vec![1.0]));
        assert_eq!(HoverPolicy { target_y: 330.0 }.decide(&obs), Ok(vec![0.0]));

        let mut linear = LinearPolicy {
            weights: [0.0, 0.0, 0.0],
            bias: 0.0,
        };
        assert_eq!(linear.decide(&obs), Ok(vec![0.0]));
        linear.weights = [0.01, 0.0, 0.0];
        let out = linear.decide(&obs).unwrap();
        assert!((out[0] - 3.2f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_borrowed_and_boxed_policies() {
        let obs = Observation {
            y: 0.0,
            gap_distance: 0.0,
            lookahead: 200.0,
        };
        fn first_output<P: DecisionPolicy>(mut policy: P, obs: &Observation) -> f64 {
            policy.decide(obs).unwrap()[0]
        }

        let mut owned = ConstantPolicy(1.0);
        assert_eq!(first_output(&mut owned, &obs), 1.0);

        let boxed: Box<dyn DecisionPolicy> = Box::new(ConstantPolicy(0.25));
        assert_eq!(first_output(boxed, &obs), 0.25);
    }

    // ---- Ledger ----

    #[test]
    fn test_ledger_accounting() {
        let mut ledger = FitnessLedger::new([GenomeId(7), GenomeId(9)]);
        ledger.credit(0, 0.1);
        ledger.credit(0, 5.0);
        ledger.debit(1, 100.0);
        ledger.record_death(1, DeathCause::OutOfBounds, 3);
        ledger.record_death(1, DeathCause::Collision, 4);
        ledger.credit(5, 1.0); // unknown index is ignored

        assert!((ledger.fitness(0).unwrap() - 5.1).abs() < 1e-12);
        let dead = ledger.by_genome(GenomeId(9)).unwrap();
        assert_eq!(dead.fitness, -100.0);
        let death = dead.death.unwrap();
        assert_eq!(death.cause, DeathCause::OutOfBounds, "first death wins");
        assert_eq!(death.tick, 3);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_report_best_entry() {
        let mut ledger = FitnessLedger::new([GenomeId(1), GenomeId(2), GenomeId(3)]);
        ledger.credit(1, 10.0);
        ledger.credit(2, 10.0);
        let report = EpisodeReport {
            entries: ledger.entries().to_vec(),
            ..Default::default()
        };
        assert_eq!(report.best().unwrap().genome, GenomeId(2));
        assert!(EpisodeReport::default().best().is_none());
    }

    // ---- Serialization ----

    #[test]
    fn test_event_tagging() {
        let event = EpisodeEvent::Collision {
            agent: 3,
            obstacle: 1,
            barrier: Barrier::Top,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Collision");
        assert_eq!(json["barrier"], "Top");
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = EpisodeSnapshot {
            phase: EpisodePhase::Terminated,
            generation: 4,
            score: 2,
            events: vec![EpisodeEvent::Terminated { tick: 9, score: 2 }],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: EpisodeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.alive(), 0);
    }
}
