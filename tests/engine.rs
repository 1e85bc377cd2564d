mod tests {
    use embassy_time::{Duration, Instant};
    use wearable_light_composer::{
        ConfigError,
        beat::BeatPhase,
        engine::{EngineConfig, EngineContext},
        heartbeat::Tint,
        motion::{MotionSensor, MotionTracker},
        palette::RAINBOW,
        pattern::{PatternId, PatternSlot},
        persistence::ModePersistence,
        render_channel::RenderChannel,
    };

    struct Shaking {
        flip: bool,
    }

    impl MotionSensor for Shaking {
        fn read_axes(&mut self) -> [u16; 3] {
            self.flip = !self.flip;
            if self.flip { [0, 0, 100] } else { [0, 0, 900] }
        }
    }

    type Engine = EngineContext<120, 2>;

    fn engine() -> Engine {
        let mut engine = Engine::new(&EngineConfig::default()).unwrap();
        assert!(engine.set_channel(0, RenderChannel::new(120, &RAINBOW).unwrap()).is_ok());
        assert!(engine.set_channel(1, RenderChannel::new(29, &RAINBOW).unwrap()).is_ok());
        engine
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_starts_with_configured_selection() {
        let engine = engine();
        assert_eq!(engine.pattern_id(), Some(PatternId::Heartbeat));
        assert_eq!(engine.palettes().current().name(), "rainbow");
        assert_eq!(engine.brightness(), 20);
        assert_eq!(engine.channels().len(), 2);
        assert_eq!(engine.channels()[1].size(), 29);

        let config = EngineConfig {
            initial_pattern: 10,
            initial_palette: 2,
            ..EngineConfig::default()
        };
        let engine = Engine::new(&config).unwrap();
        assert_eq!(engine.pattern_index(), 2);
        assert_eq!(engine.palettes().index(), 2);
    }

    #[test]
    fn test_channel_binding_by_position() {
        let mut engine = engine();
        let spare = RenderChannel::new(10, &RAINBOW).unwrap();
        let rejected = engine.set_channel(5, spare).unwrap_err();
        assert_eq!(rejected.index, 5);
        assert_eq!(rejected.channel.size(), 10);

        // Capacity is two channels
        let rejected = engine.set_channel(2, rejected.channel).unwrap_err();
        assert_eq!(rejected.index, 2);

        // Replacing an existing slot works
        assert!(engine.set_channel(1, rejected.channel).is_ok());
        assert_eq!(engine.channels()[1].size(), 10);
    }

    #[test]
    fn test_heartbeat_renders_on_its_beat_interval() {
        let mut engine = engine();
        engine.poll(at(0), BeatPhase::default());
        assert_eq!(engine.frame_interval(), Duration::from_millis(8));
        assert!(engine.render_due(at(0)));
        assert!(!engine.render_due(at(4)));
        assert!(engine.render_due(at(8)));

        let faster = BeatPhase {
            bpm: 120.0,
            ..BeatPhase::default()
        };
        engine.poll(at(9), faster);
        assert_eq!(engine.frame_interval(), Duration::from_millis(4));
        assert!(engine.render_due(at(12)));
    }

    #[test]
    fn test_next_pattern_renders_immediately() {
        let mut engine = engine();
        engine.poll(at(0), BeatPhase::default());
        assert!(engine.render_due(at(0)));

        assert_eq!(engine.next_pattern(at(2)), 1);
        assert_eq!(engine.pattern_id(), Some(PatternId::Confetti));
        assert_eq!(engine.frame_interval(), Duration::from_millis(33));
        assert!(engine.render_due(at(2)));
        assert!(!engine.render_due(at(20)));

        assert_eq!(engine.select_pattern(99, at(30)), None);
        assert_eq!(engine.pattern_index(), 1);
        assert_eq!(engine.select_pattern(4, at(30)), Some(4));
        assert_eq!(engine.pattern_id(), Some(PatternId::Plasma));
    }

    #[test]
    fn test_palette_switch_reaches_every_channel() {
        let mut engine = engine();
        assert_eq!(engine.next_palette(), 1);
        assert!(engine.channels().iter().all(|c| c.palette().name() == "party"));
        assert_eq!(engine.select_palette(40), None);
        assert_eq!(engine.select_palette(3), Some(3));
        assert!(engine.channels().iter().all(|c| c.palette().name() == "lava"));
    }

    #[test]
    fn test_brightness_fades_to_next_level() {
        let mut engine = engine();
        assert_eq!(engine.cycle_brightness(at(0)), 1);
        engine.poll(at(75), BeatPhase::default());
        let halfway = engine.brightness();
        assert!(halfway > 20 && halfway < 40);
        engine.poll(at(500), BeatPhase::default());
        assert_eq!(engine.brightness(), 40);
        assert_eq!(engine.brightness_index(), 1);
    }

    #[test]
    fn test_motion_feeds_pattern_inputs() {
        let mut engine = engine();
        let mut reference = MotionTracker::new(EngineConfig::default().motion);
        for reading in [0, 400, 410, 800, 800, 800, 0] {
            assert_eq!(engine.track_motion(reading), reference.step(reading));
            assert_eq!(engine.registry().inputs().magnitude, reference.adjusted());
        }
    }

    #[test]
    fn test_motion_runs_on_its_own_cadence() {
        let mut engine = engine();
        let mut sensor = Shaking { flip: false };
        assert!(engine.update_motion(&mut sensor, at(0)).is_some());
        assert!(engine.update_motion(&mut sensor, at(50)).is_none());
        assert!(engine.update_motion(&mut sensor, at(100)).is_some());
        assert_eq!(engine.next_motion(at(120)), at(200));
    }

    #[test]
    fn test_heartbeat_shares_the_motion_range() {
        let mut config = EngineConfig::default();
        config.motion.max_magnitude = 40;
        assert_eq!(config.heartbeat_config().max_magnitude, 40);
        assert_eq!(config.heartbeat_config().min_hue, config.heartbeat.min_hue);

        // The tracker starts fully excited, at the top of its own range
        let mut engine = Engine::new(&config).unwrap();
        assert!(engine.set_channel(0, RenderChannel::new(120, &RAINBOW).unwrap()).is_ok());
        assert_eq!(engine.motion().adjusted(), 40);
        engine.poll(at(0), BeatPhase::default());
        assert!(engine.render_due(at(0)));

        let Some(PatternSlot::Heartbeat(heartbeat)) = engine.registry().current() else {
            panic!("heartbeat should be the initial pattern");
        };
        assert_eq!(heartbeat.tint(), Tint { hue: 255, divisor: 150 });
        assert_eq!(heartbeat.tint().dim(255), 255);
    }

    #[test]
    fn test_persistence_policy_comes_from_config() {
        assert_eq!(engine().persistence(), ModePersistence::Disabled);
        let config = EngineConfig {
            persistence: ModePersistence::Remember,
            ..EngineConfig::default()
        };
        assert_eq!(Engine::new(&config).unwrap().persistence(), ModePersistence::Remember);
    }

    #[test]
    fn test_random_pattern_fades_in() {
        let mut engine = engine();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..20 {
            let index = engine.random_pattern(&mut rng, at(0));
            assert!(index < engine.registry().len());
            assert_eq!(engine.pattern_index(), index);
        }
        engine.poll(at(0), BeatPhase::default());
        assert!(engine.render_due(at(0)));
    }

    #[test]
    fn test_dropping_flag() {
        let mut engine = engine();
        assert!(!engine.is_dropping());
        engine.set_dropping(true);
        assert!(engine.is_dropping());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let no_patterns = EngineConfig {
            patterns: &[],
            ..EngineConfig::default()
        };
        assert_eq!(Engine::new(&no_patterns).err(), Some(ConfigError::NoPatterns));

        let mut bad_motion = EngineConfig::default();
        bad_motion.motion.max_magnitude = -1;
        assert!(matches!(
            Engine::new(&bad_motion),
            Err(ConfigError::InvalidMagnitudeRange { .. })
        ));
    }
}
