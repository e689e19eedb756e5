//! Configuration loading for the diff engine.
//!
//! Reads `superdiff.toml` (or an override path supplied by the caller) and
//! turns the `[intraline]` and `[segmentation]` tables into engine options.
//! Every field is optional; unknown fields are ignored so older binaries
//! accept newer files. A file that fails to parse is reported with a
//! `warn!` and replaced by defaults rather than failing the caller.

use anyhow::Result;
use diff_compute::SHORT_UNCHANGED_RUN_MAX;
use diff_intraline::{Algorithm, IntralineOptions, IntralineProcessor};
use diff_text::{GraphemeSegmenter, ROOT_LOCALE};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

const FILE_NAME: &str = "superdiff.toml";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmSetting {
    #[default]
    EditDistance,
    Lcs,
}

impl From<AlgorithmSetting> for Algorithm {
    fn from(setting: AlgorithmSetting) -> Self {
        match setting {
            AlgorithmSetting::EditDistance => Algorithm::EditDistance,
            AlgorithmSetting::Lcs => Algorithm::Lcs,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntralineConfig {
    #[serde(default)]
    pub algorithm: AlgorithmSetting,
    #[serde(default = "IntralineConfig::default_insert_cost")]
    pub insert_cost: f32,
    #[serde(default = "IntralineConfig::default_delete_cost")]
    pub delete_cost: f32,
    #[serde(default = "IntralineConfig::default_replace_cost")] // twice insert/delete
    pub replace_cost: f32,
    #[serde(default = "IntralineConfig::default_smoothing_max_run")]
    pub smoothing_max_run: usize,
    #[serde(default)]
    pub trim_affixes: bool,
    #[serde(default)]
    pub normalize: bool,
}

impl Default for IntralineConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmSetting::default(),
            insert_cost: Self::default_insert_cost(),
            delete_cost: Self::default_delete_cost(),
            replace_cost: Self::default_replace_cost(),
            smoothing_max_run: Self::default_smoothing_max_run(),
            trim_affixes: false,
            normalize: false,
        }
    }
}

impl IntralineConfig {
    const fn default_insert_cost() -> f32 {
        IntralineOptions::DEFAULT_INSERT_COST
    }
    const fn default_delete_cost() -> f32 {
        IntralineOptions::DEFAULT_DELETE_COST
    }
    const fn default_replace_cost() -> f32 {
        IntralineOptions::DEFAULT_REPLACE_COST
    }
    const fn default_smoothing_max_run() -> usize {
        SHORT_UNCHANGED_RUN_MAX
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SegmentationConfig {
    #[serde(default = "SegmentationConfig::default_locale")]
    pub locale: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
        }
    }
}

impl SegmentationConfig {
    fn default_locale() -> String {
        ROOT_LOCALE.to_owned()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub intraline: IntralineConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // file text as read, when there was one
    pub file: ConfigFile,    // parsed (or default) data
}

/// Config path: `./superdiff.toml` if present, else the platform config dir
/// (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("superdiff").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_file_missing");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed"
            );
            Ok(Config::default())
        }
    }
}

/// A usable cost: finite and not negative. Anything else falls back to the
/// default and is reported.
fn checked_cost(field: &'static str, raw: f32, default: f32) -> f32 {
    if raw.is_finite() && raw >= 0.0 {
        return raw;
    }
    info!(
        target: "config",
        field,
        raw = %raw,
        clamped = default,
        "intraline_cost_clamped"
    );
    default
}

impl Config {
    pub fn intraline_options(&self) -> IntralineOptions {
        let c = &self.file.intraline;
        IntralineOptions {
            algorithm: c.algorithm.into(),
            insert_cost: checked_cost(
                "insert_cost",
                c.insert_cost,
                IntralineOptions::DEFAULT_INSERT_COST,
            ),
            delete_cost: checked_cost(
                "delete_cost",
                c.delete_cost,
                IntralineOptions::DEFAULT_DELETE_COST,
            ),
            replace_cost: checked_cost(
                "replace_cost",
                c.replace_cost,
                IntralineOptions::DEFAULT_REPLACE_COST,
            ),
            smoothing_max_run: c.smoothing_max_run,
            trim_affixes: c.trim_affixes,
            normalize: c.normalize,
        }
    }

    pub fn segmenter(&self) -> GraphemeSegmenter {
        GraphemeSegmenter::new(self.file.segmentation.locale.as_str())
    }

    /// Processor wired with this configuration's segmenter and options.
    pub fn processor(&self) -> IntralineProcessor {
        IntralineProcessor::new(self.segmenter(), self.intraline_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture<F: FnOnce()>(level: Level, f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    fn load_text(text: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), text).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.intraline_options(), IntralineOptions::default());
        assert_eq!(cfg.segmenter().locale(), ROOT_LOCALE);
    }

    #[test]
    fn parses_intraline_section() {
        let cfg = load_text(
            "[intraline]\nalgorithm = \"lcs\"\ninsert_cost = 1.5\nreplace_cost = 4.0\nsmoothing_max_run = 0\ntrim_affixes = true\nnormalize = true\n",
        );
        assert!(cfg.raw.is_some());
        let o = cfg.intraline_options();
        assert_eq!(o.algorithm, Algorithm::Lcs);
        assert_eq!(o.insert_cost, 1.5);
        assert_eq!(o.delete_cost, 1.0);
        assert_eq!(o.replace_cost, 4.0);
        assert_eq!(o.smoothing_max_run, 0);
        assert!(o.trim_affixes);
        assert!(o.normalize);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = load_text("[intraline]\nnormalize = true\n[unknown]\nkey = 1\n");
        let o = cfg.intraline_options();
        assert_eq!(o.algorithm, Algorithm::EditDistance);
        assert_eq!(o.replace_cost, 2.0);
        assert_eq!(o.smoothing_max_run, 3);
        assert!(o.normalize);
    }

    #[test]
    fn segmentation_locale_reaches_segmenter() {
        let cfg = load_text("[segmentation]\nlocale = \"en-US\"\n");
        assert_eq!(cfg.segmenter().locale(), "en-US");
        assert_eq!(cfg.processor().segmenter().locale(), "en-US");
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[intraline\nalgorithm = ").unwrap();
        let path = tmp.path().to_path_buf();
        let mut cfg = None;
        let logs = capture(Level::WARN, || {
            cfg = Some(load_from(Some(path)).unwrap());
        });
        let cfg = cfg.unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.intraline_options(), IntralineOptions::default());
        assert!(logs.contains("WARN config:"), "logs: {logs}");
        assert!(logs.contains("config_parse_failed"), "logs: {logs}");
    }

    #[test]
    fn unknown_algorithm_is_a_parse_failure() {
        let cfg = load_text("[intraline]\nalgorithm = \"myers\"\n");
        assert_eq!(cfg.intraline_options().algorithm, Algorithm::EditDistance);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn invalid_costs_are_clamped_and_logged() {
        let cfg = load_text("[intraline]\ninsert_cost = -1.0\nreplace_cost = nan\ndelete_cost = 0.5\n");
        let mut options = None;
        let logs = capture(Level::INFO, || {
            options = Some(cfg.intraline_options());
        });
        let o = options.unwrap();
        assert_eq!(o.insert_cost, 1.0);
        assert_eq!(o.replace_cost, 2.0);
        assert_eq!(o.delete_cost, 0.5);
        assert!(logs.contains("INFO config:"), "logs: {logs}");
        assert!(logs.contains("intraline_cost_clamped"), "logs: {logs}");
        assert!(logs.contains("field=\"insert_cost\""), "logs: {logs}");
        assert!(logs.contains("field=\"replace_cost\""), "logs: {logs}");
        assert!(!logs.contains("delete_cost"), "logs: {logs}");
    }

    #[test]
    fn configured_processor_uses_options() {
        let cfg = load_text("[intraline]\nalgorithm = \"lcs\"\n");
        let p = cfg.processor();
        assert_eq!(p.options().algorithm, Algorithm::Lcs);
    }
}
