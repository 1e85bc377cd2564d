mod tests {
    use embassy_time::{Duration, Instant};
    use wearable_light_composer::transition::Fade;

    #[test]
    fn test_fade_u8() {
        let mut fade = Fade::new(0);
        assert_eq!(fade.current(), 0);
        assert!(!fade.is_transitioning());
        fade.set(100, Duration::from_millis(100), Instant::from_millis(0));
        assert!(fade.is_transitioning());
        assert_eq!(fade.target(), 100);

        fade.tick(Instant::from_millis(50));
        assert_eq!(fade.current(), 50);

        fade.tick(Instant::from_millis(100));
        assert_eq!(fade.current(), 100);
        assert!(!fade.is_transitioning());
    }

    #[test]
    fn test_fade_restart() {
        let mut fade = Fade::new(255);
        fade.restart(0, 255, Duration::from_millis(200), Instant::from_millis(1_000));
        assert_eq!(fade.current(), 0);
        assert_eq!(fade.tick(Instant::from_millis(1_200)), 255);
    }
}
