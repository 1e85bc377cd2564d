mod tests {
    use wearable_light_composer::{
        ConfigError,
        color::Rgb,
        palette::{DEFAULT_PALETTES, LAVA, OCEAN, Palette, PaletteList, RAINBOW},
    };

    static THREE: [Palette; 3] = [RAINBOW, OCEAN, LAVA];

    static RED_BLUE_STOPS: [Rgb; 2] = [Rgb { r: 255, g: 0, b: 0 }, Rgb { r: 0, g: 0, b: 255 }];
    static RED_BLUE: [Palette; 1] = [Palette::new("red_blue", &RED_BLUE_STOPS)];

    static ONE_STOP: [Rgb; 1] = [Rgb { r: 1, g: 2, b: 3 }];
    static SHORT: [Palette; 2] = [RAINBOW, Palette::new("short", &ONE_STOP)];

    #[test]
    fn test_next_wraps_to_first() {
        let mut list = PaletteList::new(&THREE).unwrap();
        assert_eq!(list.next(), 1);
        assert_eq!(list.next(), 2);
        assert_eq!(list.next(), 0);
        assert_eq!(list.current().name(), "rainbow");
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut list = PaletteList::new(&THREE).unwrap();
        assert_eq!(list.select(2).map(Palette::name), Some("lava"));
        assert!(list.select(3).is_none());
        assert_eq!(list.index(), 2);
    }

    #[test]
    fn test_rejects_bad_lists() {
        assert_eq!(PaletteList::new(&[]).err(), Some(ConfigError::NoPalettes));
        assert_eq!(
            PaletteList::new(&SHORT).err(),
            Some(ConfigError::PaletteTooShort { index: 1 })
        );
        assert!(PaletteList::new(&DEFAULT_PALETTES).is_ok());
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut list = PaletteList::new(&THREE).unwrap();
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..50 {
            assert!(list.random(&mut rng) < list.len());
        }
    }

    #[test]
    fn test_color_at_blends_cyclically() {
        let palette = &RED_BLUE[0];
        assert_eq!(palette.color_at(0, 255), Rgb::new(255, 0, 0));
        assert_eq!(palette.color_at(128, 255), Rgb::new(0, 0, 255));

        // Past the last stop the ring heads back to the first
        let wrapped = palette.color_at(255, 255);
        assert!(wrapped.r > 250);
        assert!(wrapped.b < 5);
    }

    #[test]
    fn test_color_at_scales_brightness() {
        let palette = &RED_BLUE[0];
        assert_eq!(palette.color_at(0, 128), Rgb::new(128, 0, 0));
        assert_eq!(palette.color_at(0, 0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_builtin_palettes_start_at_first_stop() {
        for palette in &DEFAULT_PALETTES {
            assert_eq!(palette.color_at(0, 255), palette.stops()[0], "{}", palette.name());
        }
    }
}
