//! Preview server: resolves post metadata per request.
//!
//! Requests are accepted on the calling thread and handled on the tokio
//! blocking pool, one task per request. Lookups read post files and
//! responses write to the socket synchronously, so neither runs on an
//! async worker thread.

mod lifecycle;
mod response;
mod route;

use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Request, Server};
use tokio::runtime::Runtime;

use super::common::markdown_resolver;
use crate::config::SiteConfig;
use crate::content::MarkdownSource;
use crate::core::{is_shutdown, register_server};
use crate::seo::MetadataResolver;
use crate::{debug, log};

use route::{Route, parse_route};

type Resolver = MetadataResolver<MarkdownSource>;

/// Bind and run the request loop until Ctrl+C.
pub fn serve_site(config: Arc<SiteConfig>, runtime: &Runtime) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}{}/<slug>", addr, config.content.base);
    debug!("serve"; "content from {}", config.content.dir.display());

    let resolver = Arc::new(markdown_resolver(&config));
    run_request_loop(&server, &resolver, runtime);
    Ok(())
}

fn run_request_loop(server: &Server, resolver: &Arc<Resolver>, runtime: &Runtime) {
    for request in server.incoming_requests() {
        let resolver = Arc::clone(resolver);
        let handle = runtime.handle().clone();
        runtime.spawn_blocking(move || {
            if let Err(e) = handle.block_on(handle_request(request, &resolver)) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
async fn handle_request(request: Request, resolver: &Resolver) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !response::is_read_request(&request) {
        return response::respond_method_not_allowed(request);
    }

    let route = parse_route(request.url(), &resolver.config().content.base);
    debug!("serve"; "{} {} -> {:?}", request.method(), request.url(), route);

    match route {
        Route::Page(slug) => {
            let resolved = resolver.resolve_slug(slug.as_deref()).await;
            response::respond_page(request, &resolved)
        }
        Route::Meta(slug) => {
            let resolved = resolver.resolve_slug(slug.as_deref()).await;
            response::respond_meta(request, &resolved)
        }
        Route::Unknown => response::respond_not_found(request),
    }
}
