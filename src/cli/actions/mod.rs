pub mod login;
pub mod logout;
pub mod todos;
pub mod users;
pub mod whoami;

use anyhow::Result;
use secrecy::SecretString;
use serde::Serialize;
use std::io::Write;

#[derive(Debug)]
pub enum Action {
    Login {
        username: String,
        phone: SecretString,
    },
    Logout,
    Whoami,
    Users,
    Todos {
        user_id: Option<i64>,
        pending: bool,
    },
}

/// Writes `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::session::{ApiClient, ClientConfig, MemoryStorage, SessionStore};
    use serde_json::{json, Value};
    use std::net::TcpListener;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    pub fn store(base: &str, storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        let config =
            ClientConfig::new(Url::parse(base).unwrap()).with_timeout(Duration::from_secs(2));
        SessionStore::new(ApiClient::new(&config).unwrap(), storage)
    }

    pub fn offline_store(storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        store("http://127.0.0.1:1", storage)
    }

    pub fn bret() -> Value {
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031"
        })
    }

    pub async fn mock_api() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([bret()])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "userId": 1, "id": 1, "title": "delectus aut autem", "completed": false },
                { "userId": 1, "id": 4, "title": "et porro tempora", "completed": true },
                { "userId": 2, "id": 21, "title": "suscipit repellat esse", "completed": false }
            ])))
            .mount(&server)
            .await;
        server
    }

    pub fn output(buffer: Vec<u8>) -> Value {
        serde_json::from_slice(&buffer).unwrap()
    }
}
