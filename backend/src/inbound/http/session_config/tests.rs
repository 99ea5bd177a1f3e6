//! Regression coverage for this module.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use tempfile::TempDir;

struct Secrets {
    _dir: TempDir,
    session_key: String,
    jwt_secret: String,
}

fn write_secret(dir: &TempDir, name: &str, len: usize) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![b'a'; len]).expect("write secret");
    path.to_str().expect("utf8 temp path").to_owned()
}

fn secrets(session_len: usize, jwt_len: usize) -> Secrets {
    let dir = TempDir::new().expect("temp dir");
    let session_key = write_secret(&dir, "session_key", session_len);
    let jwt_secret = write_secret(&dir, "jwt_secret", jwt_len);
    Secrets {
        _dir: dir,
        session_key,
        jwt_secret,
    }
}

#[fixture]
fn valid_secrets() -> Secrets {
    secrets(SESSION_KEY_MIN_LEN, JWT_SECRET_MIN_LEN)
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(secrets: &Secrets) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, secrets.session_key.clone()),
        (JWT_SECRET_FILE_ENV, secrets.jwt_secret.clone()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(valid_secrets: Secrets, #[case] missing: &'static str) {
    let mut vars = release_vars(&valid_secrets);
    vars.remove(missing);

    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_booleans(valid_secrets: Secrets, #[case] value: &str) {
    let mut vars = release_vars(&valid_secrets);
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());

    let err = release_error(vars);
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_ephemeral_secrets(valid_secrets: Secrets) {
    let mut vars = release_vars(&valid_secrets);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
#[case(KEY_FILE_ENV)]
#[case(JWT_SECRET_FILE_ENV)]
fn release_requires_readable_secret_files(valid_secrets: Secrets, #[case] variable: &'static str) {
    let mut vars = release_vars(&valid_secrets);
    vars.insert(variable, "/nonexistent/crudhub/secret".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::SecretRead { .. }
    ));
}

#[rstest]
#[case(32, JWT_SECRET_MIN_LEN, SESSION_KEY_MIN_LEN)]
#[case(SESSION_KEY_MIN_LEN, 16, JWT_SECRET_MIN_LEN)]
fn release_rejects_short_secrets(
    #[case] session_len: usize,
    #[case] jwt_len: usize,
    #[case] expected_min: usize,
) {
    let short = secrets(session_len, jwt_len);

    let err = release_error(release_vars(&short));
    assert!(matches!(
        err,
        SessionConfigError::SecretTooShort { min_len, .. } if min_len == expected_min
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(valid_secrets: Secrets) {
    let mut vars = release_vars(&valid_secrets);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_accepts_complete_configuration(valid_secrets: Secrets) {
    let env = mock_env(release_vars(&valid_secrets));

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.token_secret.as_slice(), vec![b'a'; JWT_SECRET_MIN_LEN]);
}

#[rstest]
fn debug_defaults_generate_temporary_secrets() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/session".to_owned()),
        (JWT_SECRET_FILE_ENV, "/nonexistent/jwt".to_owned()),
    ]);
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.token_secret.len(), EPHEMERAL_SECRET_LEN);
}

#[rstest]
fn debug_invalid_same_site_falls_back_to_lax(valid_secrets: Secrets) {
    let mut vars = release_vars(&valid_secrets);
    vars.insert(SAMESITE_ENV, "sideways".to_owned());

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("Y", Some(true))]
#[case("no", Some(false))]
#[case("on", None)]
fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
