//! Sign in against an in-memory backend and walk the profile operations.
//!
//! Run with: cargo run --example login_flow

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use logframe::prelude::*;

/// Minimal in-memory stand-in for the auth gateway: one known user.
struct DemoAuth {
    session: Mutex<Option<Session>>,
}

impl DemoAuth {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(None),
        })
    }
}

fn demo_session() -> Session {
    Session {
        access_token: "demo-jwt".into(),
        refresh_token: "demo-refresh".into(),
        expires_in: 3600,
        expires_at: None,
        token_type: "bearer".into(),
        user: AuthUser {
            id: "u1".into(),
            email: Some("ada@example.com".into()),
            role: None,
            last_sign_in_at: None,
            created_at: None,
            user_metadata: None,
        },
    }
}

#[async_trait]
impl AuthBackend for DemoAuth {
    async fn session(&self) -> BackendResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<SignInResponse> {
        if email == "ada@example.com" && password == "correct horse" {
            let session = demo_session();
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(SignInResponse {
                user: Some(session.user.clone()),
                session: Some(session),
            })
        } else {
            Err(BackendError::auth("Invalid login credentials"))
        }
    }

    async fn sign_out(&self) -> BackendResult<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn current_user(&self) -> BackendResult<Option<AuthUser>> {
        Ok(self.session.lock().unwrap().clone().map(|s| s.user))
    }

    async fn update_user(&self, _params: UpdateUserParams) -> BackendResult<AuthUser> {
        self.current_user()
            .await?
            .ok_or_else(|| BackendError::auth("No active session"))
    }

    fn on_auth_state_change(&self, _callback: AuthStateCallback) -> AuthSubscription {
        AuthSubscription::new(|| {})
    }
}

/// Minimal in-memory row store seeded with the demo user's profile.
struct DemoData {
    tables: Mutex<HashMap<String, Vec<JsonValue>>>,
}

impl DemoData {
    fn new() -> Arc<Self> {
        let mut tables = HashMap::new();
        tables.insert(
            "profiles".to_string(),
            vec![json!({
                "id": "u1",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "role": "admin"
            })],
        );
        Arc::new(Self {
            tables: Mutex::new(tables),
        })
    }
}

#[async_trait]
impl DataBackend for DemoData {
    async fn insert(&self, table: &str, row: JsonValue) -> BackendResult<JsonValue> {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn select(&self, table: &str, filter: RowFilter) -> BackendResult<Vec<JsonValue>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default())
    }

    async fn update(&self, table: &str, id: &str, patch: JsonValue) -> BackendResult<JsonValue> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.get_mut(table).ok_or(BackendError::NoRows)?;
        let row = rows
            .iter_mut()
            .find(|r| r.get("id").and_then(JsonValue::as_str) == Some(id))
            .ok_or(BackendError::NoRows)?;
        if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> BackendResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| r.get("id").and_then(JsonValue::as_str) != Some(id));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let auth = AuthService::new(DemoAuth::new(), DemoData::new());

    // Wrong password: the envelope carries the backend's message.
    let failed = auth.login("ada@example.com", "wrong").await;
    println!("failed login -> {:?}", failed.error);

    // Correct credentials: session plus matching profile.
    let result = auth.login("ada@example.com", "correct horse").await;
    let data = result.data.expect("login should succeed");
    println!(
        "signed in as {} {} <{}>",
        data.user.first_name.as_deref().unwrap_or(""),
        data.user.last_name.as_deref().unwrap_or(""),
        data.user.email
    );
    println!("authenticated: {}", auth.is_authenticated().await);

    // Update the profile and read it back.
    let updated = auth
        .update_profile(ProfileUpdate::new().first_name("Augusta Ada"))
        .await;
    println!(
        "updated profile -> {:?}",
        updated.data.map(|p| p.first_name)
    );

    auth.logout().await;
    println!("authenticated after logout: {}", auth.is_authenticated().await);
}
