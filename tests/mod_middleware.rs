use bson::doc;
use query_lite::middleware::BAD_REQUEST;
use query_lite::{QueryMiddleware, QueryOutcome, RawQuery, RequestContext, SchemaConfig};

#[derive(Default)]
struct FakeRequest {
    query: String,
    status: Option<u16>,
    outcome: Option<QueryOutcome>,
}

impl RequestContext for FakeRequest {
    fn raw_query(&self) -> RawQuery {
        RawQuery::parse(&self.query)
    }

    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn attach(&mut self, outcome: QueryOutcome) {
        self.outcome = Some(outcome);
    }
}

fn request(query: &str) -> FakeRequest {
    FakeRequest { query: query.to_string(), ..FakeRequest::default() }
}

#[test]
fn valid_query_attaches_document_and_continues() {
    let mw = QueryMiddleware::default();
    let mut req = request("limit=5&name=bob");
    let mut seen = None;
    mw.handle(&mut req, |_, err| seen = Some(err));
    assert_eq!(seen, Some(None));
    assert!(req.status.is_none());
    let out = req.outcome.as_ref().and_then(QueryOutcome::document).unwrap();
    assert_eq!(out.filter(), Some(&doc! { "name": "bob" }));
    assert_eq!(out.cursor().unwrap().get_i32("limit").unwrap(), 5);
}

#[test]
fn invalid_query_sets_400_and_passes_message() {
    let mw = QueryMiddleware::default();
    let mut req = request("limit=1000");
    let mut seen = None;
    mw.handle(&mut req, |ctx, err| {
        assert_eq!(ctx.status, Some(BAD_REQUEST));
        seen = err;
    });
    assert_eq!(seen.as_deref(), Some("limit must be lower than or equal to 100"));
    let err = req.outcome.as_ref().and_then(QueryOutcome::error).unwrap();
    assert_eq!(err.param, "limit");
}

#[test]
fn middleware_uses_its_config() {
    let cfg = SchemaConfig { max_limit: 2000.0, ..SchemaConfig::default() };
    let mw = QueryMiddleware::new(cfg);
    let out = mw.process(RawQuery::parse("limit=1000")).unwrap();
    assert_eq!(out.cursor().unwrap().get_i32("limit").unwrap(), 1000);
}

#[test]
fn each_request_gets_a_fresh_schema() {
    let mw = QueryMiddleware::default();
    let first = mw.process(RawQuery::parse("a=1")).unwrap();
    let second = mw.process(RawQuery::parse("b=2")).unwrap();
    assert_eq!(first.filter(), Some(&doc! { "a": 1 }));
    assert_eq!(second.filter(), Some(&doc! { "b": 2 }));
}
