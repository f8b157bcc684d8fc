//! Process-wide default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::{Error, GenerateOptions, Generator, GeneratorConfig, Uuid};

static CONFIG: OnceLock<GeneratorConfig> = OnceLock::new();

/// Sets the configuration of the global generator.
///
/// The configuration can be set only once and only before the global generator is first used;
/// the global generator otherwise runs with [`GeneratorConfig::default()`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `config` does not validate, or [`Error::IllegalState`]
/// if a configuration is already in effect.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use uuidkit::GeneratorConfig;
///
/// let config = GeneratorConfig::default().with_clock_tolerance(Duration::from_secs(5));
/// uuidkit::configure(config)?;
/// println!("{}", uuidkit::uuid7());
///
/// assert!(uuidkit::configure(GeneratorConfig::default()).is_err());
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn configure(config: GeneratorConfig) -> Result<(), Error> {
    config.validate()?;
    tracing::debug!(?config, "configuring global generator");
    CONFIG
        .set(config)
        .map_err(|_| Error::IllegalState("global generator already configured"))
}

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> MutexGuard<'static, GlobalGenInner> {
    static G: OnceLock<Mutex<GlobalGenInner>> = OnceLock::new();
    G.get_or_init(|| {
        let config = CONFIG.get_or_init(Default::default);
        Mutex::new(GlobalGenInner::new(config))
    })
    .lock()
    .expect("uuidkit: could not lock global generator")
}

/// Generates a UUID as specified by `opts` with the global generator.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] under the same conditions as
/// [`Generator::generate_with()`].
///
/// # Examples
///
/// ```rust
/// use std::time::{Duration, UNIX_EPOCH};
/// use uuidkit::GenerateOptions;
///
/// let opts = GenerateOptions::new(6)
///     .time(UNIX_EPOCH + Duration::from_secs(1_700_000_000))
///     .node(0x0000_00a0_c91e_6bf6);
/// let uuid = uuidkit::generate(&opts)?;
/// assert!(uuid.to_string().ends_with("-00a0c91e6bf6"));
/// # Ok::<(), uuidkit::Error>(())
/// ```
pub fn generate(opts: &GenerateOptions) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate_with(opts)
}

/// Generates a UUIDv1 object with a random node.
///
/// This function and [`uuid6()`] share the Gregorian clock-sequence state of the global
/// generator, so their outputs are ordered by creation time when compared with [`Ord`].
///
/// # Panics
///
/// Panics if the system clock reads a time before 1582-10-15 or beyond the range of the
/// 60-bit timestamp.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid1();
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate(1)
        .expect("uuidkit: system clock out of range")
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

/// Generates a UUIDv6 object with a random node.
///
/// # Panics
///
/// Panics if the system clock reads a time before 1582-10-15 or beyond the range of the
/// 60-bit timestamp.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid6();
/// println!("{}", uuid); // e.g., "1ec9414c-232a-6b00-b3c8-9f6bdeced846"
/// ```
pub fn uuid6() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate(6)
        .expect("uuidkit: system clock out of range")
}

/// Generates a UUIDv7 object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Panics
///
/// Panics if the system clock reads a time before 1970-01-01.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidkit::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate(7)
        .expect("uuidkit: system clock out of range")
}

/// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
#[derive(Debug)]
struct GlobalGenInner {
    #[cfg(unix)]
    pid: u32,
    config: &'static GeneratorConfig,
    generator: Generator,
}

impl GlobalGenInner {
    fn new(config: &'static GeneratorConfig) -> Self {
        Self {
            #[cfg(unix)]
            pid: std::process::id(),
            config,
            generator: Generator::with_config(config)
                .expect("uuidkit: could not initialize global generator"),
        }
    }

    /// Returns a mutable reference to the inner [`Generator`] instance, reseting the generator
    /// state on Unix if the process ID has changed.
    fn get_mut(&mut self) -> &mut Generator {
        #[cfg(unix)]
        if self.pid != std::process::id() {
            tracing::debug!(
                previous = self.pid,
                current = std::process::id(),
                "process ID changed; resetting global generator"
            );
            *self = Self::new(self.config);
        }
        &mut self.generator
    }
}
