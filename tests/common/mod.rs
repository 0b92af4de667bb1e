use std::io::Write;

/// Install a test-scoped logger so `log::trace!`/`debug!` output from the
/// trie (descent, push-down, purge/compress) shows up under `--nocapture`.
pub fn init() {
    let _ = env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .is_test(true)
        .try_init();
}

pub fn pfx(s: &str, bits: u8) -> inetnum::addr::Prefix {
    inetnum::addr::Prefix::new(s.parse().unwrap(), bits).unwrap()
}
