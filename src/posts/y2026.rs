use super::{post, Meta};
use crate::blocks::BodyBuilder;
use crate::models::Post;

pub fn posts() -> Vec<Post> {
    vec![
        ai_assisted_workflows(),
        modern_authentication(),
        scalable_trading_platforms(),
        web3_stack(),
        legacy_to_nextjs(),
    ]
}

fn ai_assisted_workflows() -> Post {
    post(
        Meta {
            id: "2026-01",
            title: "AI-Assisted Development Workflows in 2026",
            slug: "ai-assisted-development-workflows-2026",
            excerpt: "How AI tools are transforming the way we write, review, and ship code in 2026.",
            published: "2026-01-10T10:00:00Z",
            categories: &["AI", "Developer Tools", "Productivity"],
            cover: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("The AI-Augmented Developer")
            .p("AI is not replacing developers; it is amplifying them. From code generation to automated testing, AI tools have become essential parts of the modern development workflow.")
            .h3("Code Generation and Pair Programming")
            .p("Treat AI as a junior pair programmer: it generates suggestions, but you make the architectural decisions.")
            .code(
                "typescript",
                r#"@Injectable()
export class TradingService {
  constructor(
    @InjectRepository(Trade)
    private tradeRepo: Repository<Trade>,
  ) {}

  async executeTrade(dto: ExecuteTradeDto): Promise<Trade> {
    const trade = this.tradeRepo.create(dto);
    return this.tradeRepo.save(trade);
  }
}"#,
                Some("trading.service.ts"),
            )
            .h3("AI-Powered Code Review")
            .ul(&[
                "Security scanning for injection and authentication bypass patterns",
                "Performance analysis for N+1 queries and unnecessary re-renders",
                "Convention enforcement without manual nitpicking",
            ])
            .blockquote("The best AI workflow is not about replacing human judgment; it is about eliminating toil.")
            .h3("Practical Tips")
            .ol(&[
                "Review AI-generated code for security implications before merging",
                "Use AI for boilerplate, not for core business logic",
                "Combine AI review with human review",
            ])
            .build(),
    )
}

fn modern_authentication() -> Post {
    post(
        Meta {
            id: "2026-02",
            title: "Modern Authentication Patterns for 2026",
            slug: "modern-authentication-patterns-2026",
            excerpt: "Passkeys, OAuth 2.1, session tokens, and zero-trust architecture for modern web applications.",
            published: "2026-01-24T10:00:00Z",
            categories: &["Security", "Authentication", "Backend"],
            cover: "https://images.unsplash.com/photo-1555949963-ff9fe0c870eb?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Authentication in 2026: Beyond Passwords")
            .p("Passkeys are replacing passwords, OAuth 2.1 has simplified the authorization landscape, and zero-trust architecture is now the default.")
            .h3("JWT + Refresh Token Architecture")
            .p("Short-lived access tokens, rotation on every refresh, and reuse detection remain the most practical approach for API-based applications.")
            .code(
                "typescript",
                r#"async rotateTokens(refreshToken: string): Promise<TokenPair> {
  const payload = await this.verifyRefreshToken(refreshToken);
  await this.tokenStore.revoke(refreshToken);

  if (payload.used) {
    await this.tokenStore.revokeAllForUser(payload.sub);
    throw new UnauthorizedException('Token reuse detected');
  }

  return this.generateTokenPair(payload.sub);
}"#,
                Some("token.service.ts"),
            )
            .h3("Zero-Trust API Security")
            .ul(&[
                "Every request is authenticated and authorized",
                "Service-to-service communication uses mTLS certificates",
                "Request signing for sensitive operations",
                "Audit logging for compliance and forensics",
            ])
            .build(),
    )
}

fn scalable_trading_platforms() -> Post {
    post(
        Meta {
            id: "2026-03",
            title: "Building Scalable Trading Platforms End-to-End",
            slug: "building-scalable-trading-platforms-end-to-end",
            excerpt: "From order intake to settlement: the architecture behind a trading platform that scales with its users.",
            published: "2026-02-05T10:00:00Z",
            categories: &["Architecture", "Trading", "Backend"],
            cover: "https://images.unsplash.com/photo-1642790106117-e829e14a795f?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Separate the Hot Path")
            .p("Order intake, risk checks, and matching live on the hot path; reporting, notifications, and analytics consume events asynchronously.")
            .table(
                &["Component", "Latency budget"],
                &[&["Gateway", "2 ms"], &["Risk engine", "5 ms"], &["Matching", "1 ms"]],
            )
            .h3("Event Sourcing for Auditability")
            .p("Every state change is an event. Rebuilding balances from the event log makes audits and incident analysis straightforward.")
            .build(),
    )
}

fn web3_stack() -> Post {
    post(
        Meta {
            id: "2026-04",
            title: "The Modern Web3 Development Stack in 2026",
            slug: "modern-web3-development-stack-2026",
            excerpt: "Wagmi, viem, and Foundry: the tools that make Web3 development feel like regular web development.",
            published: "2026-02-12T10:00:00Z",
            categories: &["Web3", "Ethereum", "Frontend"],
            cover: "https://images.unsplash.com/photo-1639762681057-408e52192e55?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Type Safety End to End")
            .p("Using wagmi with TypeScript, you get full type inference from your contract ABIs, catching errors at compile time instead of runtime.")
            .code(
                "typescript",
                r#"const { data: balance } = useReadContract({
  address: TOKEN_ADDRESS,
  abi: erc20Abi,
  functionName: 'balanceOf',
  args: [account],
})"#,
                None,
            )
            .h3("Testing Contracts with Foundry")
            .code(
                "solidity",
                r#"function test_Transfer() public {
    token.transfer(alice, 100);
    assertEq(token.balanceOf(alice), 100);
}"#,
                Some("Token.t.sol"),
            )
            .build(),
    )
}

fn legacy_to_nextjs() -> Post {
    post(
        Meta {
            id: "2026-05",
            title: "Migrating Legacy Systems to Next.js: A Practical Guide",
            slug: "migrating-legacy-systems-to-nextjs",
            excerpt: "Incremental strategies for moving a legacy frontend to Next.js without a risky big-bang rewrite.",
            published: "2026-02-19T10:00:00Z",
            categories: &["Next.js", "Migration", "Architecture"],
            cover: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&h=400&fit=crop",
        },
        BodyBuilder::new()
            .h2("Strangle, Don't Rewrite")
            .p("Put Next.js in front of the legacy app and move one route at a time. Rewrites in next.config proxy everything that has not been migrated yet.")
            .code(
                "javascript",
                r#"module.exports = {
  async rewrites() {
    return {
      fallback: [{ source: '/:path*', destination: 'https://legacy.example.com/:path*' }],
    }
  },
}"#,
                Some("next.config.js"),
            )
            .h3("Migration Order")
            .ol(&[
                "Shared layout and navigation",
                "Read-only marketing pages",
                "Authenticated dashboards",
                "Checkout and other critical flows",
            ])
            .build(),
    )
}
