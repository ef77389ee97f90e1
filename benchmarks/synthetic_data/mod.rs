use fake::faker::boolean::en::Boolean;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

const OPS: [&str; 7] = ["", "^", "$", "~", ">=", "<", "!"];
const SORT_FIELDS: [&str; 4] = ["createdAt", "age", "name", "score"];

/// Builds `count` realistic query strings mixing built-ins and filters.
pub fn synthetic_queries(count: usize) -> Vec<String> {
    (0..count).map(|_| synthetic_query()).collect()
}

fn synthetic_query() -> String {
    let mut parts: Vec<String> = Vec::new();
    if Boolean(70).fake::<bool>() {
        parts.push(format!("limit={}", (1..100).fake::<u32>()));
    }
    if Boolean(40).fake::<bool>() {
        parts.push(format!("page={}", (1..30).fake::<u32>()));
    }
    if Boolean(50).fake::<bool>() {
        let field = SORT_FIELDS[(0..SORT_FIELDS.len()).fake::<usize>()];
        let dir = if Boolean(50).fake::<bool>() { "-" } else { "" };
        parts.push(format!("sort={dir}{field}"));
    }
    if Boolean(30).fake::<bool>() {
        parts.push("fields=name,age,-password".to_string());
    }
    let first: String = FirstName().fake();
    let op = OPS[(0..OPS.len()).fake::<usize>()];
    parts.push(format!("name={}", encode(&format!("{op}{first}"))));
    if Boolean(50).fake::<bool>() {
        parts.push(format!("age={}", encode(&format!(">={}", (18..90).fake::<u32>()))));
    }
    if Boolean(30).fake::<bool>() {
        let a: String = LastName().fake();
        let b: String = LastName().fake();
        parts.push(format!("family={a},!{b}"));
    }
    parts.join("&")
}

fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
