mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use embassy_time::{Duration, Instant};
    use wearable_light_composer::{
        ConfigError,
        beat::BeatPhase,
        color::Rgb,
        heartbeat::HeartbeatConfig,
        palette::RAINBOW,
        pattern::{
            DEFAULT_PATTERNS, Pattern, PatternId, PatternInputs, PatternRegistry, PatternSlot,
            RegistryFull,
        },
        render_channel::{Frame, RenderChannel},
    };

    /// Counts setups and paints every cell with its channel position
    struct Counter {
        setups: &'static AtomicUsize,
        ticks: usize,
    }

    impl Pattern for Counter {
        fn setup(&mut self) {
            self.setups.fetch_add(1, Ordering::SeqCst);
        }

        fn tick(&mut self, _now: Instant, _inputs: &PatternInputs) {
            self.ticks += 1;
        }

        #[allow(clippy::cast_possible_truncation)]
        fn render(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8) {
            let marker = if inputs.is_dropping { 255 } else { fade };
            frame.cells.fill(Rgb::new(frame.index as u8, self.ticks as u8, marker));
        }
    }

    fn counters<const N: usize>(count: usize, setups: &'static AtomicUsize) -> PatternRegistry<Counter, N> {
        let mut registry = PatternRegistry::new();
        for _ in 0..count {
            assert!(registry.push(Counter { setups, ticks: 0 }).is_ok());
        }
        registry
    }

    #[test]
    fn test_random_selects_in_range_with_one_setup() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 4> = counters(4, &SETUPS);
        let mut rng = fastrand::Rng::with_seed(7);

        for round in 1..=50 {
            let index = registry.random(&mut rng);
            assert!(index < 4);
            assert_eq!(registry.index(), index);
            assert_eq!(SETUPS.load(Ordering::SeqCst), round);
        }

        static NONE: AtomicUsize = AtomicUsize::new(0);
        let mut empty: PatternRegistry<Counter, 2> = counters(0, &NONE);
        assert_eq!(empty.random(&mut rng), 0);
        assert_eq!(NONE.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_next_cycles_back_with_one_setup_each() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 5> = counters(5, &SETUPS);
        let start = registry.index();

        for _ in 0..registry.len() {
            registry.next();
        }
        assert_eq!(registry.index(), start);
        assert_eq!(SETUPS.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_single_pattern_next_re_runs_setup() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 1> = counters(1, &SETUPS);

        assert_eq!(registry.next(), 0);
        assert_eq!(registry.next(), 0);
        assert_eq!(SETUPS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_registry_is_inert() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 2> = counters(0, &SETUPS);
        let mut channels = [RenderChannel::<4>::new(4, &RAINBOW).unwrap()];

        assert_eq!(registry.next(), 0);
        assert!(registry.current().is_none());
        assert!(!registry.render(&mut channels, Instant::from_millis(0), 255));
    }

    #[test]
    fn test_select_unknown_index_is_noop() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 3> = counters(3, &SETUPS);

        assert!(registry.select(2).is_some());
        assert_eq!(registry.index(), 2);
        assert!(registry.select(3).is_none());
        assert_eq!(registry.index(), 2);
        assert_eq!(SETUPS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_push_hands_back_when_full() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 1> = counters(1, &SETUPS);
        let rejected = registry.push(Counter {
            setups: &SETUPS,
            ticks: 7,
        });
        assert!(matches!(rejected, Err(RegistryFull(Counter { ticks: 7, .. }))));
    }

    #[test]
    fn test_render_ticks_once_and_draws_every_channel() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 1> = counters(1, &SETUPS);
        let mut channels = [
            RenderChannel::<8>::new(8, &RAINBOW).unwrap(),
            RenderChannel::<8>::new(3, &RAINBOW).unwrap(),
        ];

        assert!(registry.render(&mut channels, Instant::from_millis(0), 90));
        assert_eq!(channels[0].cells(), &[Rgb::new(0, 1, 90); 8]);
        assert_eq!(channels[1].cells(), &[Rgb::new(1, 1, 90); 3]);

        registry.set_dropping(true);
        registry.render(&mut channels, Instant::from_millis(10), 90);
        assert_eq!(channels[1].cells()[0], Rgb::new(1, 2, 255));
    }

    #[test]
    fn test_setters_update_inputs() {
        static SETUPS: AtomicUsize = AtomicUsize::new(0);
        let mut registry: PatternRegistry<Counter, 1> = counters(1, &SETUPS);

        registry.set_bpm(128.0);
        registry.set_on_beat(true);
        registry.set_beat_progress(0.25);
        registry.set_magnitude(17);
        let inputs = registry.inputs();
        assert!((inputs.beat.bpm - 128.0).abs() < f32::EPSILON);
        assert!(inputs.beat.on_beat);
        assert!((inputs.beat.progress - 0.25).abs() < f32::EPSILON);
        assert_eq!(inputs.magnitude, 17);

        registry.set_beat(BeatPhase::default());
        assert!(!registry.inputs().beat.on_beat);

        registry.set_default_interval(Duration::from_millis(50));
        assert_eq!(registry.frame_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_slot_registry_from_ids() {
        let registry: PatternRegistry<PatternSlot, 8> =
            PatternRegistry::from_ids(&DEFAULT_PATTERNS, &HeartbeatConfig::default()).unwrap();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.current_id(), Some(PatternId::Heartbeat));

        let empty: Result<PatternRegistry<PatternSlot, 8>, _> =
            PatternRegistry::from_ids(&[], &HeartbeatConfig::default());
        assert_eq!(empty.err(), Some(ConfigError::NoPatterns));

        let crowded: Result<PatternRegistry<PatternSlot, 2>, _> =
            PatternRegistry::from_ids(&DEFAULT_PATTERNS, &HeartbeatConfig::default());
        assert_eq!(crowded.err(), Some(ConfigError::TooManyPatterns { capacity: 2 }));
    }

    #[test]
    fn test_select_by_id() {
        let mut registry: PatternRegistry<PatternSlot, 8> =
            PatternRegistry::from_ids(&[PatternId::Plasma, PatternId::RainbowGlitter], &HeartbeatConfig::default())
                .unwrap();

        assert_eq!(registry.select_id(PatternId::RainbowGlitter), Some(1));
        assert_eq!(registry.current_id(), Some(PatternId::RainbowGlitter));
        assert_eq!(registry.select_id(PatternId::Juggle), None);
        assert_eq!(registry.index(), 1);
    }

    #[test]
    fn test_pattern_ids_round_trip_names() {
        for id in DEFAULT_PATTERNS {
            assert_eq!(PatternId::parse_from_str(id.as_str()), Some(id));
            assert_eq!(PatternId::from_raw(id as u8), Some(id));
            assert_eq!(id.to_slot(&HeartbeatConfig::default()).id(), id);
        }
        assert_eq!(PatternId::parse_from_str("aurora"), None);
        assert_eq!(PatternId::from_raw(42), None);
    }
}
