pub mod codec;
pub mod files;
pub mod settings;

pub use codec::{load, store, RawDocument, RawLog, RawTask};
pub use files::{
    atomic_write, document_file, ensure_data_dir, init_document, log_file, read_file,
    resolve_data_dir, settings_file,
};
pub use settings::{load_settings, save_settings, Settings};
