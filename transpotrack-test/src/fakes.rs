//! In-memory stand-ins for the database seams.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use transpotrack_data::{
    AuthFailure, CredentialVerifier, DataAccess, DataError, DataResult, Fetch, ProcedureCall,
    ProcedureOutcome, QueryOutcome, Role, Row, Statement,
};

enum Reply {
    Query(DataResult<QueryOutcome>),
    Procedure(DataResult<ProcedureOutcome>),
}

struct Rule {
    needle: String,
    reply: Reply,
}

/// A scripted [`DataAccess`] that records everything it is asked to run.
///
/// Replies are matched by substring: a statement whose SQL contains the
/// needle, or a procedure whose name equals it. The most recently added
/// matching rule wins. Unmatched reads return no rows; unmatched writes
/// report one affected row and a fresh generated id.
///
/// Like the real executor, a statement whose placeholder count differs
/// from its parameter count fails with a statement error.
pub struct FakeDatabase {
    rules: Mutex<Vec<Rule>>,
    statements: Mutex<Vec<Statement>>,
    calls: Mutex<Vec<ProcedureCall>>,
    next_id: AtomicU64,
}

impl Default for FakeDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            statements: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn push(&self, needle: &str, reply: Reply) -> &Self {
        self.rules.lock().unwrap().push(Rule {
            needle: needle.to_string(),
            reply,
        });
        self
    }

    /// Answer statements containing `sql` with `rows`.
    pub fn on_query(&self, sql: &str, rows: Vec<Row>) -> &Self {
        self.push(sql, Reply::Query(Ok(QueryOutcome::Rows(rows))))
    }

    /// Answer statements containing `sql` with a fixed outcome.
    pub fn on_statement(&self, sql: &str, outcome: QueryOutcome) -> &Self {
        self.push(sql, Reply::Query(Ok(outcome)))
    }

    /// Fail statements containing `sql`.
    pub fn fail_statement(&self, sql: &str, error: DataError) -> &Self {
        self.push(sql, Reply::Query(Err(error)))
    }

    /// Answer calls to procedure `name` with `result_sets`.
    pub fn on_procedure(&self, name: &str, result_sets: Vec<Vec<Row>>) -> &Self {
        self.push(name, Reply::Procedure(Ok(ProcedureOutcome::new(result_sets))))
    }

    /// Fail calls to procedure `name`.
    pub fn fail_procedure(&self, name: &str, error: DataError) -> &Self {
        self.push(name, Reply::Procedure(Err(error)))
    }

    /// Every statement executed so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    /// The most recent statement whose SQL contains `sql`.
    pub fn statement_containing(&self, sql: &str) -> Option<Statement> {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.sql().contains(sql))
            .cloned()
    }

    /// Every procedure call so far, in order.
    pub fn procedure_calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    fn default_outcome(&self, statement: &Statement) -> QueryOutcome {
        match statement.fetch() {
            Fetch::Rows => QueryOutcome::Rows(Vec::new()),
            Fetch::Affected => QueryOutcome::Affected {
                rows_affected: 1,
                last_insert_id: Some(self.next_id.fetch_add(1, Ordering::SeqCst)),
            },
        }
    }
}

#[async_trait]
impl DataAccess for FakeDatabase {
    async fn execute(&self, statement: Statement) -> DataResult<QueryOutcome> {
        self.statements.lock().unwrap().push(statement.clone());

        let expected = statement.placeholder_count();
        if expected != statement.params().len() {
            return Err(DataError::statement(format!(
                "statement expects {expected} parameters, got {}",
                statement.params().len()
            )));
        }

        let rules = self.rules.lock().unwrap();
        let scripted = rules.iter().rev().find_map(|rule| match &rule.reply {
            Reply::Query(reply) if statement.sql().contains(&rule.needle) => Some(reply.clone()),
            _ => None,
        });
        drop(rules);
        scripted.unwrap_or_else(|| Ok(self.default_outcome(&statement)))
    }

    async fn call_procedure(&self, call: ProcedureCall) -> DataResult<ProcedureOutcome> {
        self.calls.lock().unwrap().push(call.clone());
        if !call.has_valid_name() {
            return Err(DataError::statement(format!(
                "invalid procedure name: {}",
                call.name()
            )));
        }

        let rules = self.rules.lock().unwrap();
        rules
            .iter()
            .rev()
            .find_map(|rule| match &rule.reply {
                Reply::Procedure(reply) if call.name() == rule.needle => Some(reply.clone()),
                _ => None,
            })
            .unwrap_or_else(|| Ok(ProcedureOutcome::default()))
    }
}

struct Account {
    username: String,
    password: String,
    full_privileges: bool,
}

/// A [`CredentialVerifier`] over a fixed account list.
///
/// Mirrors the MySQL verifier's decisions: the role is checked before
/// any lookup, and `admin` needs an account with full privileges.
#[derive(Default)]
pub struct StaticVerifier {
    accounts: Vec<Account>,
    unavailable: Option<String>,
    lookups: AtomicUsize,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// An account that may log in as `user` only.
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.accounts.push(Account {
            username: username.into(),
            password: password.into(),
            full_privileges: false,
        });
        self
    }

    /// An account that may log in as `admin` or `user`.
    pub fn with_admin(mut self, username: &str, password: &str) -> Self {
        self.accounts.push(Account {
            username: username.into(),
            password: password.into(),
            full_privileges: true,
        });
        self
    }

    /// Every lookup fails as if the server were down.
    pub fn unavailable(mut self, reason: &str) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    /// How many verifications got past role parsing.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialVerifier for StaticVerifier {
    async fn verify(&self, username: &str, password: &str, role: &str) -> Result<Role, AuthFailure> {
        let claimed: Role = role.parse()?;
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.unavailable {
            return Err(AuthFailure::Unavailable(reason.clone()));
        }
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or(AuthFailure::InvalidCredentials)?;

        match claimed {
            Role::Admin if !account.full_privileges => Err(AuthFailure::InsufficientPrivileges),
            _ => Ok(claimed),
        }
    }
}
