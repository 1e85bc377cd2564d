mod tests {
    use embassy_time::{Duration, Instant};
    use wearable_light_composer::cadence::{Cadence, HueRotation};

    #[test]
    fn test_fires_at_most_once_per_interval() {
        let mut cadence = Cadence::new(Duration::from_millis(100));
        assert!(cadence.is_due(Instant::from_millis(0)));
        assert!(!cadence.is_due(Instant::from_millis(0)));
        assert!(!cadence.is_due(Instant::from_millis(99)));
        assert!(cadence.is_due(Instant::from_millis(100)));
        assert!(!cadence.is_due(Instant::from_millis(150)));
    }

    #[test]
    fn test_long_stall_does_not_burst() {
        let mut cadence = Cadence::new(Duration::from_millis(10));
        assert!(cadence.is_due(Instant::from_millis(0)));
        assert!(cadence.is_due(Instant::from_millis(1_000)));
        assert!(!cadence.is_due(Instant::from_millis(1_001)));
    }

    #[test]
    fn test_interval_changes_at_runtime() {
        let mut cadence = Cadence::new(Duration::from_millis(100));
        assert!(cadence.is_due(Instant::from_millis(0)));

        cadence.set_interval(Duration::from_millis(8));
        assert_eq!(cadence.interval(), Duration::from_millis(8));
        assert!(cadence.is_due(Instant::from_millis(8)));
        assert_eq!(cadence.next_due(Instant::from_millis(10)), Instant::from_millis(16));

        cadence.set_interval(Duration::from_millis(4));
        assert!(cadence.is_due(Instant::from_millis(12)));
    }

    #[test]
    fn test_reset_fires_immediately() {
        let mut cadence = Cadence::new(Duration::from_millis(100));
        assert!(cadence.is_due(Instant::from_millis(0)));
        cadence.reset();
        assert_eq!(cadence.next_due(Instant::from_millis(5)), Instant::from_millis(5));
        assert!(cadence.is_due(Instant::from_millis(5)));
    }

    #[test]
    fn test_hue_rotation_steps_every_20ms() {
        let mut rotation = HueRotation::new();
        assert_eq!(rotation.advance(Instant::from_millis(0)), 1);
        assert_eq!(rotation.advance(Instant::from_millis(10)), 1);
        assert_eq!(rotation.advance(Instant::from_millis(20)), 2);
        rotation.reset();
        assert_eq!(rotation.hue(), 0);
    }
}
