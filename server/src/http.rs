use super::config;
use super::routes;

pub async fn run(arg: config::HttpArg) {
    log::info!("Starting HTTP server at 0.0.0.0:{}...", arg.port);

    let router = routes::router(arg.requirements);

    warp::serve(router).run(([0, 0, 0, 0], arg.port)).await;
}
