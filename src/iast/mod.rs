//! Deliberately vulnerable code paths for exercising IAST tooling.
//!
//! [`taint`] pushes request input through string operations and
//! [`run_sinks`] feeds the results into the dangerous calls in [`sinks`]
//! before [`reduce`] takes them through the path and regex steps.

pub mod propagation;
pub mod sinks;

use std::time::Duration;

pub use propagation::{propagate, reduce, taint, PropagationError, Tainted, EXPECTED_RESULT};

/// Taint both inputs, hit every sink, then finish the chain and return the
/// final string. The sinks run even when the regex steps later fail.
pub async fn run_sinks(
    client: &reqwest::Client,
    outbound_timeout: Duration,
    string1: &str,
    password: &str,
) -> Result<String, PropagationError> {
    let tainted = taint(string1, password);

    sinks::path_traversal(&tainted.file_stem).await;
    sinks::command_injection(&tainted.command_arg);
    sinks::ssrf(client, &tainted.command_arg, outbound_timeout).await;
    let _ = sinks::weak_random();

    reduce(&tainted.file_stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    async fn wait_for(path: &Path) -> bool {
        for _ in 0..100 {
            if path.exists() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[tokio::test]
    async fn sinks_run_before_the_chain_breaks() {
        let dir = std::env::temp_dir().join(format!("conduit-sinks-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::env::set_var("CONDUITTMP", &dir);

        // `ls notainted_;>$CONDUITTMP/_1-;>$_notainted` creates `_1-` in `dir`
        let client = reqwest::Client::new();
        let err = run_sinks(&client, Duration::from_millis(50), ";>$CONDUITTMP/_1", "")
            .await
            .unwrap_err();
        assert!(matches!(err, PropagationError::NoMatch { step: "underscored pair", .. }), "got {err:?}");

        let created = dir.join("_1-");
        assert!(wait_for(&created).await, "command sink never wrote {}", created.display());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn plain_inputs_reach_the_expected_result() {
        let client = reqwest::Client::new();
        let result = run_sinks(&client, Duration::from_millis(50), "hi", "root1234").await.unwrap();
        assert_eq!(result, EXPECTED_RESULT);
    }
}
