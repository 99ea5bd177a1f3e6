//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use camino::Utf8Path;
use mockable::DefaultClock;
use tempfile::TempDir;

use crate::domain::{
    AccountService, EmployeeService, IntentService, MemberService, NluService, TokenAuthority,
    TokenLifetimes, UploadService,
};
use crate::outbound::files::{CapStdUploadStore, CsvTablePreviewer};
use crate::outbound::memory::{
    MemoryEmployeeRepository, MemoryIntentRepository, MemoryMemberRepository, MemoryUserRepository,
};
use crate::outbound::nlu::JsonFileNluStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer, SigningSecret};

use super::state::{CookiePolicy, HttpState};

/// Build a session middleware configured for tests.
///
/// A fresh key per call; the `Secure` flag is off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory adapters plus a scratch directory for files.
///
/// Keep the value alive for the duration of the test; dropping it removes
/// the directory.
pub struct MemoryBackend {
    pub state: HttpState,
    pub scratch: TempDir,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let scratch = TempDir::new().expect("scratch dir");
        let root = Utf8Path::from_path(scratch.path()).expect("utf8 scratch dir");

        let users = Arc::new(MemoryUserRepository::default());
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&users),
            Arc::new(Argon2PasswordHasher::with_params(256, 1, 1).expect("cheap argon2 params")),
        ));
        let issuer = JwtTokenIssuer::new(&SigningSecret::ephemeral(), Arc::new(DefaultClock));
        let tokens = TokenAuthority::new(Arc::new(issuer), users, TokenLifetimes::default());

        let nlu_store = Arc::new(
            JsonFileNluStore::open(&root.join("nlu.json")).expect("nlu store opens"),
        );
        let uploads = UploadService::new(
            Arc::new(CapStdUploadStore::open(&root.join("uploads")).expect("upload root opens")),
            Arc::new(CsvTablePreviewer),
        );

        let state = HttpState {
            login: accounts.clone(),
            registration: accounts.clone(),
            users: accounts,
            tokens: Arc::new(tokens),
            members: Arc::new(MemberService::new(Arc::new(
                MemoryMemberRepository::default(),
            ))),
            employees: Arc::new(EmployeeService::new(Arc::new(
                MemoryEmployeeRepository::default(),
            ))),
            intents: Arc::new(IntentService::new(
                Arc::new(MemoryIntentRepository::default()),
                Arc::clone(&nlu_store),
            )),
            nlu: Arc::new(NluService::new(nlu_store)),
            uploads: Arc::new(uploads),
            cookies: CookiePolicy {
                secure: false,
                ..CookiePolicy::default()
            },
        };
        Self { state, scratch }
    }

    /// Absolute path of a file inside the scratch directory.
    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.scratch.path().join(relative)
    }
}

/// An app exposing every `/api/v1` endpoint over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(super::api_services),
        )
}
