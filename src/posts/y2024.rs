use super::{post, Meta};
use crate::blocks::BodyBuilder;
use crate::models::Post;

pub fn posts() -> Vec<Post> {
    vec![
        app_router_deep_dive(),
        smart_contract_security(),
        nestjs_postgres_apis(),
        docker_for_node(),
        redis_caching(),
        advanced_typescript(),
    ]
}

fn app_router_deep_dive() -> Post {
    post(
        Meta {
            id: "2024-01",
            title: "Next.js 14 App Router Deep Dive",
            slug: "nextjs-14-app-router-deep-dive",
            excerpt: "An in-depth exploration of the Next.js 14 App Router, covering layouts, loading states, error boundaries, and advanced data fetching patterns.",
            published: "2024-01-08",
            categories: &["Next.js", "React", "Web Development"],
            cover: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Why the App Router Changes Everything")
            .p("Next.js 14 solidifies the App Router as the recommended way to build React applications. With React Server Components at its core, most of your UI renders on the server by default, which changes how we think about data fetching, layouts, and component architecture.")
            .h2("File-Based Routing with Layouts")
            .p("Each route segment maps to a folder, and special files like layout.tsx, page.tsx, loading.tsx, and error.tsx control different aspects of that segment. Layouts persist across navigations and do not re-render when a child route changes.")
            .code(
                "tsx",
                r#"// app/dashboard/layout.tsx
export default function DashboardLayout({
  children,
}: {
  children: React.ReactNode
}) {
  return (
    <div className="flex">
      <Sidebar />
      <main className="flex-1 p-6">{children}</main>
    </div>
  )
}"#,
                Some("app/dashboard/layout.tsx"),
            )
            .h3("Key Benefits")
            .ul(&[
                "Zero client-side JavaScript for server components",
                "Built-in streaming with Suspense boundaries",
                "Simplified data fetching without useEffect",
                "Granular caching control with revalidate options",
            ])
            .blockquote("The App Router is not just an improvement; it represents a fundamental shift in how we architect React applications for production.")
            .build(),
    )
}

fn smart_contract_security() -> Post {
    post(
        Meta {
            id: "2024-02",
            title: "Smart Contract Security Patterns",
            slug: "smart-contract-security-patterns",
            excerpt: "Learn the essential security patterns every Solidity developer must know to protect smart contracts from common vulnerabilities.",
            published: "2024-01-18",
            categories: &["Blockchain", "Solidity", "Security"],
            cover: "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("The Stakes of Smart Contract Security")
            .p("Smart contracts are immutable once deployed. A single vulnerability can lead to millions of dollars in losses, and unlike traditional software there is no hotfix. Rigorous security practice has to happen before deployment.")
            .h2("Reentrancy Protection")
            .p("Reentrancy occurs when an external call lets the callee re-enter the calling function before the first execution completes. The Checks-Effects-Interactions pattern is the primary defense.")
            .code(
                "solidity",
                r#"function withdraw(uint256 amount) external nonReentrant {
    require(balances[msg.sender] >= amount); // Check
    balances[msg.sender] -= amount;          // Effect
    (bool success, ) = msg.sender.call{value: amount}(""); // Interaction
    require(success);
}"#,
                Some("ReentrancyExample.sol"),
            )
            .h3("Common Security Patterns")
            .ul(&[
                "Checks-Effects-Interactions: update state before making external calls",
                "Pull over Push: let users withdraw funds instead of pushing to them",
                "Circuit Breaker: add emergency pause functionality with Pausable",
                "Access Control: use role-based permissions instead of simple owner checks",
            ])
            .bold("Always get an independent audit before mainnet deployment.")
            .build(),
    )
}

fn nestjs_postgres_apis() -> Post {
    post(
        Meta {
            id: "2024-04",
            title: "Building REST APIs with NestJS and PostgreSQL",
            slug: "building-rest-apis-nestjs-postgresql",
            excerpt: "A step-by-step guide to building production-ready REST APIs with NestJS, TypeORM, and PostgreSQL, including authentication and validation.",
            published: "2024-02-07",
            categories: &["NestJS", "PostgreSQL", "Backend"],
            cover: "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Why NestJS for APIs")
            .p("NestJS brings structure to Node.js backends: modules, dependency injection, and decorators that keep controllers thin and services testable. Paired with PostgreSQL through TypeORM, it covers most production API needs.")
            .h3("Validating Input with DTOs")
            .code(
                "typescript",
                r#"export class CreateUserDto {
  @IsEmail()
  email: string;

  @IsString()
  @MinLength(8)
  password: string;
}"#,
                Some("create-user.dto.ts"),
            )
            .h3("Setup Checklist")
            .ol(&[
                "Generate the project with the Nest CLI",
                "Configure TypeORM with environment-based settings",
                "Enable the global ValidationPipe",
                "Add JWT authentication guards",
                "Write e2e tests against a disposable database",
            ])
            .build(),
    )
}

fn docker_for_node() -> Post {
    post(
        Meta {
            id: "2024-05",
            title: "Docker Containerization for Node.js Applications",
            slug: "docker-containerization-nodejs",
            excerpt: "Learn how to containerize Node.js applications with Docker, including multi-stage builds, optimization techniques, and production best practices.",
            published: "2024-02-20",
            categories: &["Docker", "Node.js", "DevOps"],
            cover: "https://images.unsplash.com/photo-1605745341112-85968b19335b?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Multi-Stage Builds")
            .p("Multi-stage builds keep the final image small by compiling in one stage and copying only the runtime artifacts into a slim base image.")
            .code(
                "dockerfile",
                r#"FROM node:20-alpine AS build
WORKDIR /app
COPY package*.json ./
RUN npm ci
COPY . .
RUN npm run build

FROM node:20-alpine
WORKDIR /app
COPY --from=build /app/dist ./dist
COPY --from=build /app/node_modules ./node_modules
USER node
CMD ["node", "dist/main.js"]"#,
                Some("Dockerfile"),
            )
            .h3("Image Size Comparison")
            .table(
                &["Base image", "Final size"],
                &[&["node:20", "1.1 GB"], &["node:20-slim", "240 MB"], &["node:20-alpine", "180 MB"]],
            )
            .ul(&[
                "Run as a non-root user",
                "Pin base image versions",
                "Use .dockerignore to keep the build context small",
            ])
            .build(),
    )
}

fn redis_caching() -> Post {
    post(
        Meta {
            id: "2024-11",
            title: "Redis Caching Strategies for High-Traffic Applications",
            slug: "redis-caching-strategies",
            excerpt: "Implement effective caching strategies with Redis to handle high traffic loads. Covers cache-aside, write-through, TTL strategies, and cache invalidation patterns.",
            published: "2024-05-21",
            categories: &["Redis", "Performance", "Backend"],
            cover: "https://images.unsplash.com/photo-1544383835-bda2bc66a55d?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Cache-Aside")
            .p("Cache-aside is the most common pattern: read from the cache, fall back to the database on a miss, then populate the cache with a TTL.")
            .code(
                "typescript",
                r#"async function getUser(id: string): Promise<User> {
  const cached = await redis.get(`user:${id}`)
  if (cached) return JSON.parse(cached)

  const user = await db.users.findById(id)
  await redis.set(`user:${id}`, JSON.stringify(user), 'EX', 300)
  return user
}"#,
                Some("user.cache.ts"),
            )
            .h3("Choosing a Strategy")
            .table(
                &["Strategy", "Consistency", "Write cost"],
                &[
                    &["Cache-aside", "Eventual", "Low"],
                    &["Write-through", "Strong", "Higher"],
                    &["Write-behind", "Eventual", "Lowest"],
                ],
            )
            .blockquote("There are only two hard things in computer science: cache invalidation and naming things.")
            .build(),
    )
}

fn advanced_typescript() -> Post {
    post(
        Meta {
            id: "2024-08",
            title: "Advanced TypeScript Patterns for Large Codebases",
            slug: "advanced-typescript-patterns",
            excerpt: "Master advanced TypeScript patterns including discriminated unions, template literal types, branded types, and conditional types for maintainable codebases.",
            published: "2024-04-03",
            categories: &["TypeScript", "Architecture", "Frontend"],
            cover: "https://images.unsplash.com/photo-1516116216624-53e697fedbea?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Encoding Rules in Types")
            .p("Basic annotations only scratch the surface. Discriminated unions, branded types, and conditional types let you encode business logic in the type system and catch errors at compile time.")
            .h3("Branded Types")
            .code(
                "ts",
                r#"type Brand<T, B> = T & { readonly __brand: B }
type UserId = Brand<string, 'UserId'>
type PostId = Brand<string, 'PostId'>

function loadPost(id: PostId) { /* ... */ }"#,
                None,
            )
            .h4("When to reach for them")
            .ul(&[
                "Identifiers that share a primitive type",
                "Validated values such as emails or positive numbers",
                "Units of measure that must not be mixed",
            ])
            .build(),
    )
}
