// bcrypt is deliberately slow, so hashing runs on the blocking pool.

use crate::error::ApiError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// `false` for a wrong password or a stored value that is not a bcrypt hash
pub async fn verify_password(password: String, hashed: String) -> Result<bool, ApiError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed).unwrap_or(false)).await?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verifies_only_the_original_password() {
        let hashed = hash_password("myprecious".to_string(), 4).await.unwrap();
        assert_ne!(hashed, "myprecious");

        assert!(verify_password("myprecious".to_string(), hashed.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hashed).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_does_not_verify() {
        assert!(!verify_password("x".to_string(), "not-a-hash".to_string()).await.unwrap());
    }
}
