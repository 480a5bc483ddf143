// Integration tests drive the binary with fake `uv`/`bun`/`npm` shell scripts
#![cfg(unix)]

mod helpers;
mod test_inspect;
mod test_release;
