use club_logbook::{
    app_state::{AppState, LogbookStoreType},
    domain::{LogbookStore, RatioConfig},
    services::data_stores::{HashmapLogbookStore, PostgresLogbookStore},
    utils::constants::{test, DATABASE_URL},
    Application,
};
use reqwest::cookie::Jar;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, Executor, PgConnection, PgPool,
};
use std::{str::FromStr, sync::Arc};
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const TEST_SECRET_KEY: &str = "test-secret-key";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub logbook_store: LogbookStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_store(HashmapLogbookStore::default()).await
    }

    pub async fn with_store<S>(store: S) -> Self
    where
        S: LogbookStore + Send + Sync + 'static,
    {
        let logbook_store: LogbookStoreType = Arc::new(RwLock::new(store));

        let app_state = AppState::new(
            logbook_store.clone(),
            RatioConfig::default(),
            Secret::new(TEST_SECRET_KEY.to_owned()),
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar)
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            logbook_store,
        }
    }

    pub async fn get_totals(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_add_member_form(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/add_member", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_add_member<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/add_member", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_add_entry_form(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/add_entry", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_add_entry<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/add_entry", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_single_member(
        &self,
        query: &[(&str, &str)],
    ) -> reqwest::Response {
        self.http_client
            .get(format!("{}/single_member", &self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_all_entries(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/all_entries", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_entry(&self, entry_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/delete_entry", &self.address))
            .query(&[("entry_id", entry_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_member(&self, member_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/delete_member", &self.address))
            .query(&[("member_id", member_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_list_members(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/list_members", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

/// A `TestApp` backed by `PostgresLogbookStore` on a throwaway database.
pub struct PostgresTestApp {
    pub app: TestApp,
    pub pg_pool: PgPool,
    tmp_db_name: String,
}

impl PostgresTestApp {
    pub async fn new() -> Self {
        let tmp_db_name = Uuid::new_v4().to_string();
        let pg_pool = configure_postgresql(&tmp_db_name).await;
        let app =
            TestApp::with_store(PostgresLogbookStore::new(pg_pool.clone()))
                .await;

        Self {
            app,
            pg_pool,
            tmp_db_name,
        }
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pg_pool)
            .await
            .expect("Failed to count rows")
    }
}

impl AsyncTestContext for PostgresTestApp {
    async fn setup() -> PostgresTestApp {
        PostgresTestApp::new().await
    }

    async fn teardown(self) {
        self.pg_pool.close().await;
        delete_database(&self.tmp_db_name).await;
    }
}

fn server_connect_options() -> PgConnectOptions {
    PgConnectOptions::from_str(DATABASE_URL.expose_secret())
        .expect("Failed to parse PostgreSQL connection string")
}

async fn configure_postgresql(db_name: &str) -> PgPool {
    let connect_options = server_connect_options();

    let mut connection = PgConnection::connect_with(&connect_options)
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options.database(db_name))
        .await
        .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to migrate the database");

    pg_pool
}

async fn delete_database(db_name: &str) {
    let mut connection = PgConnection::connect_with(&server_connect_options())
        .await
        .expect("Failed to connect to Postgres");

    // Kill any connections still held by the spawned server
    connection
        .execute(
            format!(
                r#"
                SELECT pg_terminate_backend(pg_stat_activity.pid)
                FROM pg_stat_activity
                WHERE pg_stat_activity.datname = '{}'
                  AND pid <> pg_backend_pid();
        "#,
                db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to drop the database.");

    connection
        .execute(format!(r#"DROP DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}

pub async fn get_json_response_body(response: reqwest::Response) -> Value {
    response
        .json::<Value>()
        .await
        .expect("Failed to parse response body as JSON")
}

pub async fn get_error_message(response: reqwest::Response) -> String {
    get_json_response_body(response).await["error"]
        .as_str()
        .expect("error field should be a string")
        .to_owned()
}

pub async fn get_form_token(form_response: reqwest::Response) -> String {
    assert_eq!(
        form_response.status().as_u16(),
        200,
        "Failed to fetch form: {:?}",
        form_response
    );
    get_json_response_body(form_response).await["csrfToken"]
        .as_str()
        .expect("csrfToken should be a string")
        .to_owned()
}

pub async fn add_member(app: &TestApp, name: &str) -> i64 {
    let token = get_form_token(app.get_add_member_form().await).await;

    let response = app
        .post_add_member(&serde_json::json!({
            "name": name,
            "csrfToken": token
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add member {name}: {:?}",
        response
    );

    get_json_response_body(response).await["id"]
        .as_i64()
        .expect("member id should be an integer")
}

pub async fn add_entry(
    app: &TestApp,
    member_id: i64,
    activity: &str,
    date: &str,
) -> i64 {
    let form = get_json_response_body(app.get_add_entry_form().await).await;
    let token = form["csrfToken"].as_str().unwrap().to_owned();
    let activity_id = form["activities"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == activity)
        .unwrap_or_else(|| panic!("activity {activity} should exist"))["id"]
        .as_i64()
        .unwrap();

    let response = app
        .post_add_entry(&serde_json::json!({
            "memberId": member_id,
            "activityId": activity_id,
            "date": date,
            "csrfToken": token
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add {activity} entry: {:?}",
        response
    );

    get_json_response_body(response).await["id"]
        .as_i64()
        .expect("entry id should be an integer")
}
