//! Unit tests for dp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ForkId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(AgentId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ForkId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(ForkId(0).to_string(), "ForkId(0)");
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{ConfigError, Policy, ScenarioConfig, TimeRange};

    #[test]
    fn default_five_seat_table_is_valid() {
        assert!(ScenarioConfig::new(5, Policy::Arbitrated).validate().is_ok());
    }

    #[test]
    fn rejects_single_agent() {
        let err = ScenarioConfig::new(1, Policy::Naive).validate().unwrap_err();
        assert_eq!(err, ConfigError::TooFewAgents(1));
    }

    #[test]
    fn rejects_inverted_interval() {
        let cfg = ScenarioConfig::new(5, Policy::Naive).think_time(TimeRange::from_millis(900, 500));
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::EmptyInterval { what: "think", .. }
        ));
    }

    #[test]
    fn rejects_zero_run_duration() {
        let cfg = ScenarioConfig::new(5, Policy::Naive).run_for(Duration::ZERO);
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::ZeroDuration);
    }

    #[test]
    fn point_interval_is_not_empty() {
        assert!(!TimeRange::from_millis(100, 100).is_empty());
        assert!(TimeRange::from_millis(101, 100).is_empty());
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(TimeRange::from_millis(0, 0).is_empty());
        let cfg = ScenarioConfig::new(5, Policy::Naive).eat_time(TimeRange::from_millis(0, 0));
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::EmptyInterval { what: "eat", .. }
        ));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, TimeRange};

    #[test]
    fn same_seed_same_draws() {
        let range = TimeRange::from_millis(10, 50);
        let mut a = AgentRng::new(42, AgentId(2));
        let mut b = AgentRng::new(42, AgentId(2));
        for _ in 0..16 {
            assert_eq!(range.sample(&mut a), range.sample(&mut b));
        }
    }

    #[test]
    fn sample_stays_in_closed_interval() {
        let range = TimeRange::from_millis(10, 50);
        let mut rng = AgentRng::new(7, AgentId(0));
        for _ in 0..256 {
            let d = range.sample(&mut rng);
            assert!(d >= range.min && d <= range.max, "got {d:?}");
        }
    }

    #[test]
    fn point_interval_samples_exactly() {
        let range = TimeRange::from_millis(25, 25);
        let mut rng = AgentRng::new(0, AgentId(1));
        assert_eq!(range.sample(&mut rng), range.min);
    }
}

#[cfg(test)]
mod stop {
    use std::time::{Duration, Instant};

    use crate::StopToken;

    #[test]
    fn fresh_token_is_not_stopped() {
        assert!(!StopToken::new().is_stopped());
    }

    #[test]
    fn sleep_completes_when_not_stopped() {
        let token = StopToken::new();
        assert!(token.sleep_for(Duration::from_millis(10)));
    }

    #[test]
    fn stop_interrupts_sleep() {
        let token = StopToken::new();
        let remote = token.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.stop();
        });

        let start = Instant::now();
        let completed = token.sleep_for(Duration::from_secs(10));
        assert!(!completed);
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn sleep_after_stop_returns_immediately() {
        let token = StopToken::new();
        token.stop();
        assert!(!token.sleep_for(Duration::from_secs(10)));
    }
}

#[cfg(test)]
mod event {
    use crate::{AgentAction, AgentState};

    #[test]
    fn actions_map_to_coarse_states() {
        assert_eq!(AgentAction::Thinking.state(), AgentState::Thinking);
        assert_eq!(AgentAction::AwaitingSeat.state(), AgentState::Hungry);
        assert_eq!(AgentAction::TakingLeftFork.state(), AgentState::Hungry);
        assert_eq!(AgentAction::TakingRightFork.state(), AgentState::Hungry);
        assert_eq!(AgentAction::Eating.state(), AgentState::Eating);
        assert_eq!(AgentAction::DoneEating.state(), AgentState::Thinking);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(AgentAction::Eating.label(), "EATING");
        assert_eq!(AgentAction::AwaitingSeat.to_string(), "HUNGRY - awaiting seat");
    }
}
