//! Logger Setup
//!
//! 標準出力へのログ出力を初期化

use log::LevelFilter;

/// ロガーを初期化する
///
/// `RUST_LOG` が設定されていれば設定値より優先する。
/// 二回目以降の呼び出しは無視される。
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::info!("logger initiated (level: {})", level);
    }
}
