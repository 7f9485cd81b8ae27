//! # taal_midi
//!
//! Render a taal (a cyclic sequence of tabla bols with a fixed beat count)
//! at a given tempo as a standard MIDI file (Type 0, single track) on the
//! General MIDI percussion channel.
//!
//! * **Bol** → percussion key (via [`BolMap`], unknown bols → pitch 60)
//! * **Beats** → note length (`480 / beats` ticks by default)
//! * **Tempo** → tempo meta-event (`60_000_000 / bpm` µs per quarter)
//!
//! MIDI bytes are written directly; the whole file is assembled in memory
//! before the sink is touched.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use taal_midi::{Laya, PatternCatalog, SmfEncoder, TaalCatalog};
//!
//! let catalog = TaalCatalog::with_defaults();
//! let teentaal = catalog.lookup("Teentaal").unwrap();
//!
//! SmfEncoder::new()                       // channel 10, 4 cycles, velocity 80
//!     .encode_to_path(&teentaal, Laya::Drut.into(), "teentaal.mid")
//!     .unwrap();
//! ```

pub mod bols;
pub mod config;
pub mod encoder;
pub mod kit;
pub mod smf;
pub mod tempo;
pub mod vlq;

mod error;

pub use bols::{BolMap, DEFAULT_PITCH};
pub use config::{DurationMode, EncoderConfig};
pub use encoder::SmfEncoder;
pub use error::EncodeError;
pub use kit::DrumKit;
pub use tempo::{Laya, Tempo};

pub use taal_catalog::{CatalogError, Pattern, PatternCatalog, Taal, TaalCatalog};
