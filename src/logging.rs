use tracing_subscriber::EnvFilter;

/// ログ初期化（mainの先頭で1回だけ呼ぶ）
///
/// RUST_LOG が設定されていればそれを優先する。
pub fn init(verbose: bool) {
    let default_level = if verbose { "meeting_qr=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // テストなどで二重初期化された場合は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
