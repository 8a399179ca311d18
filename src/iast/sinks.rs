use md5::{Digest, Md5};
use rand::Rng;
use sqlx::SqlitePool;
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

/// Read `/<stem>.txt`. The path is built straight from request data.
pub async fn path_traversal(file_stem: &str) {
    let path = format!("/{file_stem}.txt");
    if let Err(e) = tokio::fs::read_to_string(&path).await {
        debug!("path sink {}: {}", path, e);
    }
}

/// Start `ls <arg>` through the shell without waiting for it
pub fn command_injection(arg: &str) {
    let command = format!("ls {arg}");
    let spawned = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => debug!("command sink {:?} started as pid {:?}", command, child.id()),
        Err(e) => debug!("command sink {:?}: {}", command, e),
    }
}

/// GET `http://<arg>`
pub async fn ssrf(client: &reqwest::Client, arg: &str, timeout: Duration) {
    let target = format!("http://{arg}");
    let url = match url::Url::parse(&target) {
        Ok(url) => url,
        Err(e) => {
            debug!("ssrf sink {:?}: {}", target, e);
            return;
        }
    };

    if let Err(e) = client.get(url).timeout(timeout).send().await {
        debug!("ssrf sink {:?}: {}", target, e);
    }
}

pub fn weak_random() -> u32 {
    rand::thread_rng().gen_range(1..=10)
}

/// Hex MD5 digest
pub fn weak_hash(data: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Look an article up by a title spliced into the SQL text. Failures,
/// including ones caused by quotes in `q`, are swallowed.
pub async fn sql_injection(pool: &SqlitePool, q: &str) {
    let sql = format!("SELECT id FROM article WHERE title = '{q}'");
    match sqlx::query(&sql).fetch_all(pool).await {
        Ok(rows) => debug!("sql sink matched {} rows", rows.len()),
        Err(e) => debug!("sql sink {:?}: {}", sql, e),
    }
}
