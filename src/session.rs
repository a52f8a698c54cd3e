//! Session identity resolution.
//!
//! The store treats the session id as an opaque key, so anything stable for
//! the lifetime of one terminal works. Resolution order: explicit flag,
//! `NOTED_SESSION` environment variable, then host plus parent pid (the
//! shell that spawned us), which survives across invocations from the same
//! prompt.

pub const SESSION_ENV: &str = "NOTED_SESSION";

pub fn resolve(explicit: Option<String>) -> String {
    if let Some(id) = explicit {
        return id;
    }
    if let Ok(id) = std::env::var(SESSION_ENV) {
        if !id.is_empty() {
            return id;
        }
    }
    format!("{}:{}", hostname(), shell_pid())
}

fn hostname() -> String {
    std::fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(unix)]
fn shell_pid() -> u32 {
    std::os::unix::process::parent_id()
}

#[cfg(not(unix))]
fn shell_pid() -> u32 {
    std::process::id()
}
