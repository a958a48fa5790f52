use super::{post, Meta};
use crate::blocks::BodyBuilder;
use crate::models::Post;

pub fn posts() -> Vec<Post> {
    vec![
        whats_new_in_nextjs_15(),
        crypto_dashboards(),
        typescript_5_features(),
        trading_websockets(),
        postgres_tuning(),
    ]
}

fn whats_new_in_nextjs_15() -> Post {
    post(
        Meta {
            id: "2025-01",
            title: "What's New in Next.js 15",
            slug: "whats-new-in-nextjs-15",
            excerpt: "A deep dive into the latest features, performance improvements, and breaking changes in Next.js 15.",
            published: "2025-01-10",
            categories: &["Next.js", "React", "Web Development"],
            cover: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("The Biggest Release Yet")
            .p("Next.js 15 is a significant leap forward: React Server Components by default, a stable App Router, and a completely revamped caching strategy.")
            .h3("Revamped Caching Semantics")
            .p("Fetch requests, GET Route Handlers, and client-side navigations are no longer cached by default. You now opt into caching explicitly, which gives you full control over data freshness.")
            .code(
                "typescript",
                r#"const res = await fetch('https://api.example.com/data', {
  next: { revalidate: 3600 },
})

const live = await fetch('https://api.example.com/live-prices')"#,
                None,
            )
            .h3("Partial Pre-Rendering (PPR)")
            .p("PPR serves a static shell instantly from the CDN while dynamic sections stream in as they become ready, all in a single HTTP request.")
            .code(
                "javascript",
                r#"export default {
  experimental: {
    ppr: 'incremental',
  },
}"#,
                Some("next.config.mjs"),
            )
            .h3("Other Notable Improvements")
            .ul(&[
                "React 19 support with built-in Actions and useOptimistic",
                "next/after API for work after a response finishes streaming",
                "Turbopack is now stable for the dev server",
                "Enhanced TypeScript support for next.config.ts files",
            ])
            .blockquote("Next.js 15 is not just an incremental update; it redefines the developer experience for React-based web applications.")
            .build(),
    )
}

fn crypto_dashboards() -> Post {
    post(
        Meta {
            id: "2025-02",
            title: "Building Real-Time Crypto Dashboards",
            slug: "building-real-time-crypto-dashboards",
            excerpt: "How to stream market data into a responsive React dashboard without drowning the browser in updates.",
            published: "2025-01-24",
            categories: &["Crypto", "React", "Real-time"],
            cover: "https://images.unsplash.com/photo-1621761191319-c6fb62004040?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Streaming Prices Without Melting the UI")
            .p("Exchanges can push hundreds of ticks per second. Rendering each one is wasteful; batching updates per animation frame keeps the dashboard smooth.")
            .code(
                "typescript",
                r#"const pending = new Map<string, Tick>()

socket.onmessage = (event) => {
  const tick: Tick = JSON.parse(event.data)
  pending.set(tick.symbol, tick)
}

function flush() {
  if (pending.size > 0) {
    store.applyTicks([...pending.values()])
    pending.clear()
  }
  requestAnimationFrame(flush)
}"#,
                Some("price-stream.ts"),
            )
            .h3("Lessons Learned")
            .ol(&[
                "Coalesce updates per symbol before rendering",
                "Virtualize long order books",
                "Reconnect with jittered backoff",
            ])
            .build(),
    )
}

fn typescript_5_features() -> Post {
    post(
        Meta {
            id: "2025-06",
            title: "TypeScript 5 Features You Should Be Using",
            slug: "typescript-5-features-you-should-be-using",
            excerpt: "Const type parameters, decorators, and the satisfies operator: the TypeScript 5 features that pay off every day.",
            published: "2025-03-21",
            categories: &["TypeScript", "Frontend"],
            cover: "https://images.unsplash.com/photo-1587620962725-abab7fe55159?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Features That Reduce Boilerplate")
            .p("TypeScript 5 brought a wave of features that genuinely improve day-to-day development and catch more bugs at compile time.")
            .h3("The satisfies Operator")
            .code(
                "ts",
                r#"const routes = {
  home: '/',
  blog: '/blog',
} satisfies Record<string, `/${string}`>"#,
                None,
            )
            .h3("Const Type Parameters")
            .code(
                "ts",
                r#"function tuple<const T extends readonly unknown[]>(...items: T): T {
  return items
}"#,
                None,
            )
            .build(),
    )
}

fn trading_websockets() -> Post {
    post(
        Meta {
            id: "2025-07",
            title: "Building Real-Time Trading Systems with WebSockets",
            slug: "building-real-time-trading-systems-websockets",
            excerpt: "Designing a WebSocket gateway for order updates: fan-out, backpressure, and recovering from dropped connections.",
            published: "2025-04-04",
            categories: &["WebSocket", "Trading", "Backend"],
            cover: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Gateway Architecture")
            .p("Clients subscribe to channels per account and per market. The gateway fans out events from the matching engine and never blocks on a slow consumer.")
            .ul(&[
                "One subscription registry per node",
                "Redis pub/sub between nodes",
                "Sequence numbers on every message so clients detect gaps",
            ])
            .h3("Handling Slow Consumers")
            .p("When a client's send buffer grows past a threshold the gateway drops it and lets the client resync from a snapshot plus the sequence it last saw.")
            .blockquote("A trading UI that shows stale data confidently is worse than one that admits it is reconnecting.")
            .build(),
    )
}

fn postgres_tuning() -> Post {
    post(
        Meta {
            id: "2025-13",
            title: "PostgreSQL Performance Tuning: A Complete Guide",
            slug: "postgresql-performance-tuning-complete-guide",
            excerpt: "Indexes, query plans, and configuration settings that make the biggest difference for PostgreSQL performance.",
            published: "2025-07-07",
            categories: &["PostgreSQL", "Database", "Performance"],
            cover: "https://images.unsplash.com/photo-1544383835-bda2bc66a55d?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Start With the Query Plan")
            .p("EXPLAIN ANALYZE tells you what the planner actually did. Sequential scans on large tables and nested loops over big row estimates are the usual suspects.")
            .code(
                "sql",
                r#"EXPLAIN ANALYZE
SELECT o.id, o.total, u.email
FROM orders o
JOIN users u ON u.id = o.user_id
WHERE o.created_at > now() - interval '7 days';"#,
                None,
            )
            .h3("Covering Indexes")
            .code(
                "sql",
                r#"CREATE INDEX CONCURRENTLY idx_orders_recent
  ON orders (created_at)
  INCLUDE (total, user_id);"#,
                Some("migrations/0042_orders_index.sql"),
            )
            .h3("Settings Worth Revisiting")
            .table(
                &["Setting", "Starting point"],
                &[
                    &["shared_buffers", "25% of RAM"],
                    &["effective_cache_size", "75% of RAM"],
                    &["work_mem", "16MB"],
                ],
            )
            .build(),
    )
}
