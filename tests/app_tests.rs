mod common;

use anyhow::anyhow;
use common::RecordingWriter;
use http::Method;
use skiff::{
    App, AppConfig, ControllerRegistry, DispatchOutcome, Dispatcher, Handler, HandlerReturn,
    Middleware, MiddlewareRegistry, Request, Response, Router,
};

fn failing_app(debug: bool) -> App {
    let mut router = Router::new();
    router.get(
        "/fail",
        Handler::function(|_req, _params| Err(anyhow!("boom"))),
    );
    let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), MiddlewareRegistry::new());
    App::new(dispatcher, AppConfig { debug })
}

#[test]
fn test_production_500_is_generic() {
    common::init_tracing();
    let app = failing_app(false);
    let mut writer = RecordingWriter::new();

    let outcome = app.handle(&Request::new(Method::GET, "/fail"), &mut writer);

    assert!(matches!(outcome, DispatchOutcome::InternalError(_)));
    assert_eq!(writer.status, Some(500));
    assert_eq!(writer.body, b"Internal Server Error");
    assert_eq!(writer.writes, 1);
}

#[test]
fn test_debug_500_renders_the_cause() {
    let app = failing_app(true);
    let mut writer = RecordingWriter::new();

    app.handle(&Request::new(Method::GET, "/fail"), &mut writer);

    assert_eq!(writer.status, Some(500));
    assert!(writer.body_str().contains("boom"), "{}", writer.body_str());
}

#[test]
fn test_success_flushes_exactly_once() {
    let mut router = Router::new();
    router.get(
        "/ok",
        Handler::function(|_req, _params| Ok(HandlerReturn::Body("ok".to_string()))),
    );
    let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), MiddlewareRegistry::new());
    let app = App::new(dispatcher, AppConfig::default());
    let mut writer = RecordingWriter::new();

    let outcome = app.handle(&Request::new(Method::GET, "/ok"), &mut writer);

    assert!(matches!(outcome, DispatchOutcome::Handled));
    assert_eq!(writer.writes, 1);
    assert_eq!(writer.status, Some(200));
    assert_eq!(writer.body, b"ok");
}

#[test]
fn test_not_found_still_flushes() {
    let router = Router::new();
    let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), MiddlewareRegistry::new());
    let app = App::new(dispatcher, AppConfig::default());
    let mut writer = RecordingWriter::new();

    let outcome = app.handle(&Request::new(Method::GET, "/nope"), &mut writer);

    assert!(matches!(outcome, DispatchOutcome::NotFound));
    assert_eq!(writer.writes, 1);
    assert_eq!(writer.status, Some(404));
}

#[test]
fn test_vetoed_dispatch_flushes_the_hooks_response() {
    struct Deny;
    impl Middleware for Deny {
        fn before(&self, _params: &[String], res: &mut Response) -> bool {
            res.redirect("/login");
            false
        }
    }

    let mut registry = MiddlewareRegistry::new();
    registry.register("deny", || Deny);
    let mut router = Router::new();
    router.before("deny");
    router.get(
        "/secret",
        Handler::function(|_req, _params| Ok(HandlerReturn::Body("secret".to_string()))),
    );
    let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), registry);
    let app = App::new(dispatcher, AppConfig::default());
    let mut writer = RecordingWriter::new();

    let outcome = app.handle(&Request::new(Method::GET, "/secret"), &mut writer);

    assert!(matches!(outcome, DispatchOutcome::ShortCircuited));
    assert_eq!(writer.writes, 1);
    assert_eq!(writer.status, Some(302));
    assert_eq!(writer.header("Location"), Some("/login"));
    assert!(writer.body.is_empty());
}

#[test]
fn test_panicking_middleware_is_backstopped_by_the_kernel() {
    struct Exploding;
    impl Middleware for Exploding {
        fn before(&self, _params: &[String], _res: &mut Response) -> bool {
            panic!("middleware blew up");
        }
    }

    let mut registry = MiddlewareRegistry::new();
    registry.register("exploding", || Exploding);
    let mut router = Router::new();
    router.before("exploding");
    router.get(
        "/x",
        Handler::function(|_req, _params| Ok(HandlerReturn::Empty)),
    );
    let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), registry);
    let app = App::new(dispatcher, AppConfig::default());
    let mut writer = RecordingWriter::new();

    let outcome = app.handle(&Request::new(Method::GET, "/x"), &mut writer);

    assert!(matches!(outcome, DispatchOutcome::InternalError(_)));
    assert_eq!(writer.writes, 1);
    assert_eq!(writer.status, Some(500));
    assert_eq!(writer.body, b"Internal Server Error");
}
