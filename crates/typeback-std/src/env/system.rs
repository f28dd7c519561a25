use std::env;

use super::ReadEnv;

/// The real process environment. Zero-sized, trivially `Send + Sync`.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_to_std_env() {
        // PATH is set in any environment the tests run under.
        assert_eq!(SystemEnv.var("PATH").ok(), std::env::var("PATH").ok());
    }

    #[test]
    fn missing_var_is_an_error() {
        assert!(SystemEnv.var("TYPEBACK_NO_SUCH_VAR_8472").is_err());
    }

    #[test]
    fn usable_behind_the_trait() {
        fn var_or<E: ReadEnv>(env: &E, key: &str, fallback: &str) -> String {
            env.var(key).unwrap_or_else(|_| fallback.to_string())
        }
        assert_eq!(
            var_or(&SystemEnv, "TYPEBACK_NO_SUCH_VAR_8472", "fallback"),
            "fallback"
        );
    }
}
