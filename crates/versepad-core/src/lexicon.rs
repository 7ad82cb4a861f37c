//! Loading the pronunciation dictionary.
//!
//! A [`Lexicon`] owns a [`PronunciationDictionary`] together with whether it
//! is actually usable. A dictionary file that does not exist leaves the
//! engine running with an empty dictionary in the `Unavailable` state, so
//! every lookup misses and callers can tell the user why. A file that exists
//! but cannot be read or parsed is a hard error.
//!
//! The [`shared`] module holds an optional process-wide lexicon behind a
//! load-once barrier for callers that do not want to thread one through.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::PronunciationDictionary;
use crate::error::{LexiconError, LexiconResult};
use crate::rhyme::RhymeIndex;

/// Where the pronunciation dictionary comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionarySource {
    /// The sample lexicon compiled into the crate.
    #[default]
    Embedded,
    /// A CMUdict-format file on disk.
    File(Utf8PathBuf),
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// Whether the dictionary can serve lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Availability {
    /// Loaded and non-empty.
    Ready,
    /// The backing store is absent; all lookups miss.
    Unavailable {
        /// Human-readable explanation for the UI.
        reason: String,
    },
}

impl Availability {
    /// Whether lookups can succeed.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// A loaded dictionary and its availability.
#[derive(Debug, Clone)]
pub struct Lexicon {
    dictionary: PronunciationDictionary,
    availability: Availability,
    source: DictionarySource,
}

impl Lexicon {
    /// Load the dictionary from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] when the file exists but cannot be read, is
    /// not valid CMUdict text, or contains no entries. A missing file is not
    /// an error.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn open(source: DictionarySource) -> LexiconResult<Self> {
        let dictionary = match &source {
            DictionarySource::Embedded => PronunciationDictionary::embedded()?,
            DictionarySource::File(path) => {
                let bytes = match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                        tracing::warn!(%path, "pronunciation dictionary not found");
                        let reason = format!("pronunciation dictionary {path} not found");
                        return Ok(Self::unavailable(source, reason));
                    }
                    Err(err) => {
                        return Err(LexiconError::Read {
                            path: path.clone(),
                            source: Arc::new(err),
                        });
                    }
                };
                // cmudict 0.7b carries a few Latin-1 bytes.
                PronunciationDictionary::parse(&String::from_utf8_lossy(&bytes))?
            }
        };

        if dictionary.is_empty() {
            return Err(LexiconError::Empty {
                source_name: source.to_string(),
            });
        }

        tracing::debug!(words = dictionary.len(), "pronunciation dictionary ready");
        Ok(Self {
            dictionary,
            availability: Availability::Ready,
            source,
        })
    }

    /// The embedded sample lexicon.
    pub fn embedded() -> LexiconResult<Self> {
        Self::open(DictionarySource::Embedded)
    }

    /// A lexicon with an empty dictionary in the `Unavailable` state.
    pub fn unavailable(source: DictionarySource, reason: impl Into<String>) -> Self {
        Self {
            dictionary: PronunciationDictionary::empty(),
            availability: Availability::Unavailable {
                reason: reason.into(),
            },
            source,
        }
    }

    /// Wrap an already-parsed dictionary.
    pub fn from_dictionary(dictionary: PronunciationDictionary, source: DictionarySource) -> Self {
        let availability = if dictionary.is_empty() {
            Availability::Unavailable {
                reason: "pronunciation dictionary is empty".to_string(),
            }
        } else {
            Availability::Ready
        };
        Self {
            dictionary,
            availability,
            source,
        }
    }

    /// The dictionary (empty when unavailable).
    pub const fn dictionary(&self) -> &PronunciationDictionary {
        &self.dictionary
    }

    /// Availability state.
    pub const fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Whether lookups can succeed.
    pub const fn is_ready(&self) -> bool {
        self.availability.is_ready()
    }

    /// Where the dictionary was loaded from.
    pub const fn source(&self) -> &DictionarySource {
        &self.source
    }

    /// Build a rhyme index over this lexicon's dictionary.
    pub fn rhyme_index(&self) -> RhymeIndex<'_> {
        RhymeIndex::new(&self.dictionary)
    }
}

/// Process-wide lexicon, loaded once and read-only afterwards.
pub mod shared {
    use std::sync::OnceLock;

    use super::{DictionarySource, Lexicon};
    use crate::error::{LexiconError, LexiconResult};
    use crate::rhyme::RhymeIndex;

    static LEXICON: LoadOnce = LoadOnce::new();
    static RHYME_INDEX: OnceLock<RhymeIndex<'static>> = OnceLock::new();

    #[derive(Debug)]
    struct Loaded {
        lexicon: Lexicon,
        failure: Option<LexiconError>,
    }

    /// Load-once barrier around a [`Lexicon`].
    ///
    /// The first [`init`](Self::init) settles the barrier whether the load
    /// succeeds or fails, so readers blocked in [`get`](Self::get) are
    /// always released. After a failed load they see an unavailable
    /// lexicon whose reason is the load error.
    #[derive(Debug, Default)]
    pub struct LoadOnce {
        cell: OnceLock<Loaded>,
    }

    impl LoadOnce {
        /// An unsettled barrier.
        pub const fn new() -> Self {
            Self {
                cell: OnceLock::new(),
            }
        }

        /// Load from `source` unless the barrier is already settled.
        ///
        /// Only the first call loads anything; later and racing calls get
        /// the stored outcome and their `source` is ignored.
        ///
        /// # Errors
        ///
        /// Returns the [`Lexicon::open`] failure. It is stored, so every
        /// later call returns it again.
        pub fn init(&self, source: DictionarySource) -> LexiconResult<&Lexicon> {
            let loaded = self.cell.get_or_init(|| {
                let described = source.clone();
                match Lexicon::open(source) {
                    Ok(lexicon) => Loaded {
                        lexicon,
                        failure: None,
                    },
                    Err(err) => {
                        tracing::error!(error = %err, "pronunciation dictionary failed to load");
                        Loaded {
                            lexicon: Lexicon::unavailable(described, err.to_string()),
                            failure: Some(err),
                        }
                    }
                }
            });
            match &loaded.failure {
                Some(err) => Err(err.clone()),
                None => Ok(&loaded.lexicon),
            }
        }

        /// The lexicon, blocking until [`init`](Self::init) has settled.
        pub fn get(&self) -> &Lexicon {
            &self.cell.wait().lexicon
        }

        /// The lexicon if the barrier has settled.
        pub fn try_get(&self) -> Option<&Lexicon> {
            self.cell.get().map(|loaded| &loaded.lexicon)
        }
    }

    /// Load the shared lexicon from `source`. See [`LoadOnce::init`].
    ///
    /// # Errors
    ///
    /// Returns the stored [`Lexicon::open`] failure.
    pub fn init(source: DictionarySource) -> LexiconResult<&'static Lexicon> {
        LEXICON.init(source)
    }

    /// The shared lexicon, blocking until [`init`] has completed or failed.
    pub fn get() -> &'static Lexicon {
        LEXICON.get()
    }

    /// The shared lexicon if [`init`] has run.
    pub fn try_get() -> Option<&'static Lexicon> {
        LEXICON.try_get()
    }

    /// Rhyme index over the shared lexicon, built on first use.
    ///
    /// Blocks like [`get`] until the lexicon is initialized.
    pub fn rhyme_index() -> &'static RhymeIndex<'static> {
        RHYME_INDEX.get_or_init(|| RhymeIndex::new(get().dictionary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn embedded_is_ready() {
        let lexicon = Lexicon::embedded().unwrap();
        assert!(lexicon.is_ready());
        assert_eq!(lexicon.source(), &DictionarySource::Embedded);
        assert!(lexicon.dictionary().contains("moon"));
    }

    #[test]
    fn missing_file_is_unavailable_not_error() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "nope.dict");
        let lexicon = Lexicon::open(DictionarySource::File(path)).unwrap();
        assert!(!lexicon.is_ready());
        assert!(lexicon.dictionary().is_empty());
        match lexicon.availability() {
            Availability::Unavailable { reason } => assert!(reason.contains("nope.dict")),
            Availability::Ready => panic!("expected unavailable"),
        }
        assert!(lexicon.rhyme_index().perfect_rhymes("cat").is_empty());
    }

    #[test]
    fn file_source_loads() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "mini.dict");
        fs::write(&path, ";;; mini\nCAT  K AE1 T\nHAT  HH AE1 T\n").unwrap();

        let lexicon = Lexicon::open(DictionarySource::File(path)).unwrap();
        assert!(lexicon.is_ready());
        assert_eq!(lexicon.dictionary().len(), 2);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "bad.dict");
        fs::write(&path, "CAT  K AE1 T\nHAT  HH AE9 T\n").unwrap();

        let err = Lexicon::open(DictionarySource::File(path)).unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 2, .. }));
    }

    #[test]
    fn comment_only_file_is_empty_error() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "empty.dict");
        fs::write(&path, ";;; nothing here\n\n").unwrap();

        let err = Lexicon::open(DictionarySource::File(path)).unwrap_err();
        assert!(matches!(err, LexiconError::Empty { .. }));
    }

    #[test]
    fn unreadable_path_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let err = Lexicon::open(DictionarySource::File(path.clone())).unwrap_err();
        match err {
            LexiconError::Read { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn latin1_bytes_are_tolerated() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "latin1.dict");
        fs::write(&path, b"CAF\xc9  K AE0 F EY1\nCAT  K AE1 T\n").unwrap();

        let lexicon = Lexicon::open(DictionarySource::File(path)).unwrap();
        assert!(lexicon.dictionary().contains("caf"));
    }

    #[test]
    fn from_empty_dictionary_is_unavailable() {
        let lexicon =
            Lexicon::from_dictionary(PronunciationDictionary::empty(), DictionarySource::Embedded);
        assert!(!lexicon.is_ready());
    }

    #[test]
    fn shared_lexicon_is_initialized_once() {
        let first = shared::init(DictionarySource::Embedded).unwrap();
        let second = shared::init(DictionarySource::File("ignored.dict".into())).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, shared::get()));
        assert!(shared::try_get().is_some());

        let index = shared::rhyme_index();
        assert!(std::ptr::eq(index.dictionary(), first.dictionary()));
        assert!(index.perfect_rhymes("moon").contains("soon"));
    }

    #[test]
    fn shared_get_waits_for_init() {
        let reader = std::thread::spawn(|| shared::get().dictionary().len());
        shared::init(DictionarySource::Embedded).unwrap();
        assert!(reader.join().unwrap() > 0);
    }

    #[test]
    fn failed_load_releases_waiting_readers() {
        static BARRIER: shared::LoadOnce = shared::LoadOnce::new();
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "bad.dict");
        fs::write(&path, "CAT  K AE9 T\n").unwrap();

        let reader = std::thread::spawn(|| BARRIER.get().is_ready());
        let err = BARRIER.init(DictionarySource::File(path.clone())).unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 1, .. }));
        assert!(!reader.join().unwrap());

        let lexicon = BARRIER.try_get().unwrap();
        assert_eq!(lexicon.source(), &DictionarySource::File(path));
        match lexicon.availability() {
            Availability::Unavailable { reason } => assert!(reason.contains("line 1")),
            Availability::Ready => panic!("expected unavailable"),
        }

        // The failure is final; a later source is not tried.
        let again = BARRIER.init(DictionarySource::Embedded).unwrap_err();
        assert!(matches!(again, LexiconError::Parse { line: 1, .. }));
    }
}
