//! ログ出力
//!
//! TUI の代替スクリーンを崩さないよう、ログはファイルにのみ書き出す。

use crate::config::AppConfig;
use crate::error::Result;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

/// ファイルロガーを初期化
///
/// ロガーが既に初期化済みの場合は何もしない。
pub fn init(config: &AppConfig) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Error)
        .build();
    if WriteLogger::init(config.level_filter(), log_config, file).is_err() {
        log::debug!("logger already initialized");
    }
    Ok(())
}
