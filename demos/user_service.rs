//! A small user service built from typed handlers.
//!
//! Run with `RUST_LOG=info cargo run --example user_service`, then try:
//!
//! ```text
//! curl -i 'http://127.0.0.1:8081/users?id=1'
//! curl -i 'http://127.0.0.1:8081/users?id=9'
//! curl -i -X POST -H 'Content-Type: application/json' -d '{"name":"Carol"}' http://127.0.0.1:8081/users
//! curl -i -H 'X-Forwarded-For: 5.6.7.8' http://127.0.0.1:8081/whoami
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use httpreply::{add_handler, read_user_ip, HttpRequest, HttpServer, Method, Response, ServerConfig};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
}

type Users = Arc<Mutex<HashMap<u32, User>>>;

fn get_user(users: &Users, req: &HttpRequest) -> Response<User> {
    let id = match req.get_query_param("id").map(|id| id.parse::<u32>()) {
        Some(Ok(id)) => id,
        Some(Err(e)) => return Response::bad_request(e),
        None => return Response::bad_request("query parameter `id` is required"),
    };

    let users = match users.lock() {
        Ok(users) => users,
        Err(poisoned) => poisoned.into_inner(),
    };
    match users.get(&id) {
        Some(user) => Response::ok(user.clone()),
        None => Response::not_found(format!("user {id} does not exist")),
    }
}

fn create_user(users: &Users, req: &HttpRequest) -> Response<User> {
    let new_user: NewUser = match req.json() {
        Ok(new_user) => new_user,
        Err(e) => return Response::bad_request(e),
    };

    let mut users = match users.lock() {
        Ok(users) => users,
        Err(poisoned) => poisoned.into_inner(),
    };
    let id = users.keys().max().map_or(1, |max| max + 1);
    let user = User { id, name: new_user.name };
    users.insert(id, user.clone());
    info!("Created user {id}");

    Response::ok(user)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let users: Users = Arc::new(Mutex::new(HashMap::from([
        (1, User { id: 1, name: "Alice".to_string() }),
        (2, User { id: 2, name: "Bob".to_string() }),
    ])));

    let config = ServerConfig::default()
        .with_addr("127.0.0.1:8081".parse()?)
        .with_max_connections(100);
    let server = HttpServer::new(config);

    let store = users.clone();
    add_handler(
        |pattern, handler| server.mount(pattern, vec![Method::GET], handler),
        "/users",
        move |req| {
            let response = get_user(&store, &req);
            async move { Some(response) }
        },
    )
    .await;

    let store = users.clone();
    add_handler(
        |pattern, handler| server.mount(pattern, vec![Method::POST], handler),
        "/users",
        move |req| {
            let response = create_user(&store, &req);
            async move { Some(response) }
        },
    )
    .await;

    add_handler(
        |pattern, handler| server.mount(pattern, vec![Method::GET], handler),
        "/whoami",
        |req| async move {
            Some(Response::ok(HashMap::from([("ip", read_user_ip(&req))])))
        },
    )
    .await;

    // No response of its own; the server answers with an empty 200
    add_handler(
        |pattern, handler| server.mount(pattern, vec![Method::GET], handler),
        "/void",
        |_req| async { None::<Response<()>> },
    )
    .await;

    server.start().await?;

    Ok(())
}
