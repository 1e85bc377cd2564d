mod tests {
    use wearable_light_composer::persistence::{
        MemoryStore, ModePersistence, ModeStore, NoStore, boot_index,
    };

    #[test]
    fn test_disabled_ignores_store() {
        let mut store = MemoryStore::with_value(3);
        assert_eq!(boot_index(ModePersistence::Disabled, &mut store, 1, 8), 1);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_remember_uses_stored_index() {
        let mut store = MemoryStore::with_value(3);
        assert_eq!(boot_index(ModePersistence::Remember, &mut store, 0, 8), 3);

        let mut empty = MemoryStore::new();
        assert_eq!(boot_index(ModePersistence::Remember, &mut empty, 2, 8), 2);
    }

    #[test]
    fn test_cycle_on_boot_advances_and_writes_back() {
        let mut store = MemoryStore::with_value(7);
        assert_eq!(boot_index(ModePersistence::CycleOnBoot, &mut store, 0, 8), 0);
        assert_eq!(store.value(), Some(0));
        assert_eq!(boot_index(ModePersistence::CycleOnBoot, &mut store, 0, 8), 1);
        assert_eq!(store.value(), Some(1));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_invalid_stored_value_falls_back() {
        let mut store = MemoryStore::with_value(200);
        assert_eq!(boot_index(ModePersistence::Remember, &mut store, 4, 8), 4);
        assert_eq!(boot_index(ModePersistence::CycleOnBoot, &mut store, 4, 8), 4);
        assert_eq!(store.value(), Some(4));
    }

    #[test]
    fn test_no_store_and_empty_lists() {
        let mut store = NoStore;
        assert_eq!(store.load(), None);
        assert_eq!(boot_index(ModePersistence::CycleOnBoot, &mut store, 9, 8), 1);
        assert_eq!(boot_index(ModePersistence::Remember, &mut MemoryStore::new(), 0, 0), 0);
        assert!(ModePersistence::Remember.remembers_selection());
        assert!(!ModePersistence::CycleOnBoot.remembers_selection());
    }
}
