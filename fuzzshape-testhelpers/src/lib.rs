#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    color_backtrace::install();

    let filter = std::env::var("FUZZSHAPE_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::DEBUG));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact()
                .with_test_writer(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Set up a tracing subscriber for tests.
///
/// Safe to call from every test: the subscriber is installed once per
/// process. The filter comes from `FUZZSHAPE_LOG` (e.g.
/// `FUZZSHAPE_LOG=fuzzshape=trace`), defaulting to `debug`.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// Builds input buffers in the layout the generator reads: little-endian
/// fixed-width numbers, one byte per bool, and strings prefixed with their
/// byte length as a native-width integer.
#[derive(Debug, Default, Clone)]
pub struct BytePusher {
    bytes: Vec<u8>,
}

/// Width in bytes of `isize`/`usize`, and of every length prefix.
pub const NATIVE: usize = core::mem::size_of::<usize>();

impl BytePusher {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Appends `1` or `0`.
    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        self.bytes.push(u8::from(value));
        self
    }

    /// Appends the low `width` bytes of `value`.
    pub fn push_u64(&mut self, value: u64, width: usize) -> &mut Self {
        assert!(
            matches!(width, 1 | 2 | 4 | 8),
            "integer width must be 1, 2, 4 or 8 bytes, got {width}"
        );
        self.bytes.extend_from_slice(&value.to_le_bytes()[..width]);
        self
    }

    /// Appends `value` truncated to `width` bytes, two's complement.
    pub fn push_i64(&mut self, value: i64, width: usize) -> &mut Self {
        self.push_u64(value as u64, width)
    }

    /// Appends a native-width index or length.
    pub fn push_native(&mut self, value: usize) -> &mut Self {
        self.push_u64(value as u64, NATIVE)
    }

    /// Appends an 8-byte float.
    pub fn push_f64(&mut self, value: f64) -> &mut Self {
        self.push_u64(value.to_bits(), 8)
    }

    /// Appends a 4-byte float.
    pub fn push_f32(&mut self, value: f32) -> &mut Self {
        self.push_u64(u64::from(value.to_bits()), 4)
    }

    /// Appends the byte length of `value`, then its bytes.
    pub fn push_string(&mut self, value: &str) -> &mut Self {
        self.push_native(value.len());
        self.push_bytes(value.as_bytes())
    }

    /// Number of bytes pushed so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes pushed so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Takes the finished buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
