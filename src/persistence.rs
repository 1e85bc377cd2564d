//! Pattern selection across power cycles
//!
//! Storage is best effort. A store that forgets, or returns garbage, only
//! means the wearable boots into the configured pattern.

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Non-volatile byte holding the pattern index
pub trait ModeStore {
    /// Stored index, if any
    fn load(&mut self) -> Option<u8>;

    fn store(&mut self, index: u8);
}

/// What to do with the stored pattern index at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePersistence {
    /// Always start with the configured pattern
    #[default]
    Disabled,
    /// Start with the pattern that was last selected
    Remember,
    /// Start with the pattern after the stored one and store it.
    /// Switching the wearable off and on again selects the next pattern.
    CycleOnBoot,
}

impl ModePersistence {
    /// Whether pattern switches should be written back
    pub const fn remembers_selection(self) -> bool {
        matches!(self, Self::Remember)
    }
}

/// RAM-backed store, for hosts and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: Option<u8>,
    writes: usize,
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            value: None,
            writes: 0,
        }
    }

    pub const fn with_value(value: u8) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }

    pub const fn value(&self) -> Option<u8> {
        self.value
    }

    /// Number of `store` calls so far
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ModeStore for MemoryStore {
    fn load(&mut self) -> Option<u8> {
        self.value
    }

    fn store(&mut self, index: u8) {
        self.value = Some(index);
        self.writes += 1;
    }
}

/// A store for builds without persistent memory
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl ModeStore for NoStore {
    fn load(&mut self) -> Option<u8> {
        None
    }

    fn store(&mut self, _index: u8) {}
}

/// Pattern index to boot with
///
/// Stored values outside `0..count` fall back to `initial`. With
/// [`ModePersistence::CycleOnBoot`] the chosen index is written back.
#[allow(clippy::cast_possible_truncation)]
pub fn boot_index<S: ModeStore + ?Sized>(
    policy: ModePersistence,
    store: &mut S,
    initial: usize,
    count: usize,
) -> usize {
    if count == 0 {
        return 0;
    }
    let initial = initial % count;
    let stored = store
        .load()
        .map(usize::from)
        .filter(|&index| index < count);

    let index = match policy {
        ModePersistence::Disabled => initial,
        ModePersistence::Remember => stored.unwrap_or(initial),
        ModePersistence::CycleOnBoot => {
            let index = stored.map_or(initial, |stored| (stored + 1) % count);
            store.store(index.min(usize::from(u8::MAX)) as u8);
            index
        }
    };

    #[cfg(feature = "esp32-log")]
    println!("[persistence] boot pattern {} ({:?})", index, policy);

    index
}
