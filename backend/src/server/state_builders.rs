//! Builders wiring adapters into the shared HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crudhub::domain::ports::{
    EmployeeRepository, IntentRepository, MemberRepository, NluStoreError, UploadStoreError,
    UserRepository,
};
use crudhub::domain::{
    AccountService, EmployeeService, IntentService, MemberService, NluService, TokenAuthority,
    TokenLifetimes, UploadService,
};
use crudhub::inbound::http::state::{CookiePolicy, HttpState};
use crudhub::outbound::files::{CapStdUploadStore, CsvTablePreviewer};
use crudhub::outbound::memory::{
    MemoryEmployeeRepository, MemoryIntentRepository, MemoryMemberRepository, MemoryUserRepository,
};
use crudhub::outbound::nlu::JsonFileNluStore;
use crudhub::outbound::persistence::{
    DbPool, DieselEmployeeRepository, DieselIntentRepository, DieselMemberRepository,
    DieselUserRepository,
};
use crudhub::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error("NLU data store unavailable: {0}")]
    Nlu(#[from] NluStoreError),
    #[error("upload store unavailable: {0}")]
    Uploads(#[from] UploadStoreError),
}

/// Repositories backing the account, member, employee and intent services.
struct Repositories<U, M, E, I> {
    users: Arc<U>,
    members: Arc<M>,
    employees: Arc<E>,
    intents: Arc<I>,
}

impl Repositories<DieselUserRepository, DieselMemberRepository, DieselEmployeeRepository, DieselIntentRepository> {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            members: Arc::new(DieselMemberRepository::new(pool.clone())),
            employees: Arc::new(DieselEmployeeRepository::new(pool.clone())),
            intents: Arc::new(DieselIntentRepository::new(pool.clone())),
        }
    }
}

impl Repositories<MemoryUserRepository, MemoryMemberRepository, MemoryEmployeeRepository, MemoryIntentRepository> {
    fn memory() -> Self {
        Self {
            users: Arc::default(),
            members: Arc::default(),
            employees: Arc::default(),
            intents: Arc::default(),
        }
    }
}

/// Adapters that do not depend on the repository backend.
struct SharedAdapters {
    issuer: Arc<JwtTokenIssuer>,
    lifetimes: TokenLifetimes,
    nlu: Arc<JsonFileNluStore>,
    uploads: Arc<CapStdUploadStore>,
    cookies: CookiePolicy,
}

fn assemble<U, M, E, I>(repos: Repositories<U, M, E, I>, shared: SharedAdapters) -> HttpState
where
    U: UserRepository + 'static,
    M: MemberRepository + 'static,
    E: EmployeeRepository + 'static,
    I: IntentRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&repos.users),
        Arc::new(Argon2PasswordHasher::default()),
    ));
    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        tokens: Arc::new(TokenAuthority::new(
            shared.issuer,
            repos.users,
            shared.lifetimes,
        )),
        members: Arc::new(MemberService::new(repos.members)),
        employees: Arc::new(EmployeeService::new(repos.employees)),
        intents: Arc::new(IntentService::new(repos.intents, Arc::clone(&shared.nlu))),
        nlu: Arc::new(NluService::new(shared.nlu)),
        uploads: Arc::new(UploadService::new(
            shared.uploads,
            Arc::new(CsvTablePreviewer),
        )),
        cookies: shared.cookies,
    }
}

/// Build the shared HTTP state, choosing PostgreSQL repositories when a pool
/// is configured and in-memory ones otherwise.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, StateBuildError> {
    let shared = SharedAdapters {
        issuer: Arc::new(JwtTokenIssuer::new(
            &config.token_secret,
            Arc::new(DefaultClock),
        )),
        lifetimes: config.lifetimes,
        nlu: Arc::new(JsonFileNluStore::open(&config.storage.nlu_data_path)?),
        uploads: Arc::new(CapStdUploadStore::open(&config.storage.upload_root)?),
        cookies: config.cookies,
    };

    let state = match &config.db_pool {
        Some(pool) => assemble(Repositories::diesel(pool), shared),
        None => {
            tracing::warn!("no database configured; records are kept in memory");
            assemble(Repositories::memory(), shared)
        }
    };
    Ok(web::Data::new(state))
}
