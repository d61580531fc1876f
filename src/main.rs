//! Newsroom - terminal client for the Newsroom publishing backend
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use newsroom::models::{ArticleSort, GenerateRequest, ProfileUpdate, WritingStyle};
use newsroom::screens::home::{FeedFilter, HomeScreen};
use newsroom::screens::lists::{ArticleListScreen, ListSource};
use newsroom::screens::statistics::{self, StatisticsScreen};
use newsroom::screens::{Applied, Trigger, assistant};
use newsroom::{ApiClient, ApiError, Article, ArticleDraft, Config, Session};

/// Column width used when wrapping article bodies
const WRAP_WIDTH: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = parse_args()?;
    match command {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    let session = Arc::new(Session::open_default()?);
    if let Err(e) = session.restore() {
        tracing::warn!("Could not restore session: {e}");
    }
    let api = ApiClient::from_config(&config, session)?;

    let result = run(&api, &config, command).await;
    if let Err(e) = &result {
        if let Some(api_error) = e.downcast_ref::<ApiError>() {
            if api_error.is_auth_failure() {
                api.session().clear()?;
                eprintln!("Your session has expired. Run: newsroom login <email>");
            }
        }
    }
    result
}

/// CLI commands
enum Command {
    Ping,
    Login {
        email: String,
        password: Option<String>,
    },
    Register {
        username: String,
        email: String,
        password: Option<String>,
    },
    Logout,
    Whoami,
    Articles {
        query: Option<String>,
        category: Option<String>,
        sort: Option<ArticleSort>,
    },
    Show {
        slug: String,
    },
    Post {
        title: String,
        content: String,
        category: Option<String>,
    },
    Edit {
        slug: String,
        title: Option<String>,
        content: Option<String>,
        category: Option<String>,
    },
    Delete {
        slug: String,
    },
    Comment {
        slug: String,
        text: String,
    },
    Like {
        slug: String,
    },
    Mine,
    Favorites,
    Profile {
        username: Option<String>,
        email: Option<String>,
    },
    Stats,
    Generate {
        topic: String,
        style: WritingStyle,
        publish: bool,
    },
    Analytics,
    Recommend,
    Help,
    Version,
}

/// Value following `flag` (or its short form)
fn flag_value(args: &[String], long: &str, short: &str) -> Option<String> {
    args.iter()
        .position(|a| a == long || a == short)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Positional argument at `index`, or an error naming it
fn positional(args: &[String], index: usize, name: &str) -> Result<String> {
    args.get(index)
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing {name}\nRun 'newsroom --help' for usage"))
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Articles {
            query: None,
            category: None,
            sort: None,
        });
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "ping" => Ok(Command::Ping),

        "login" => Ok(Command::Login {
            email: positional(&args, 2, "email")?,
            password: args.get(3).cloned(),
        }),

        "register" => Ok(Command::Register {
            username: positional(&args, 2, "username")?,
            email: positional(&args, 3, "email")?,
            password: args.get(4).cloned(),
        }),

        "logout" => Ok(Command::Logout),
        "whoami" => Ok(Command::Whoami),

        "articles" | "ls" => {
            let sort = match flag_value(&args, "--sort", "-s") {
                Some(s) => Some(
                    ArticleSort::from_str(&s)
                        .ok_or_else(|| anyhow::anyhow!("Unknown sort order: {s}"))?,
                ),
                None => None,
            };
            Ok(Command::Articles {
                query: flag_value(&args, "--search", "-q"),
                category: flag_value(&args, "--category", "-c"),
                sort,
            })
        }

        "show" => Ok(Command::Show {
            slug: positional(&args, 2, "article slug")?,
        }),

        "post" => Ok(Command::Post {
            title: positional(&args, 2, "title")?,
            content: positional(&args, 3, "content")?,
            category: flag_value(&args, "--category", "-c"),
        }),

        "edit" => Ok(Command::Edit {
            slug: positional(&args, 2, "article slug")?,
            title: flag_value(&args, "--title", "-t"),
            content: flag_value(&args, "--content", "-b"),
            category: flag_value(&args, "--category", "-c"),
        }),

        "delete" | "rm" => Ok(Command::Delete {
            slug: positional(&args, 2, "article slug")?,
        }),

        "comment" => Ok(Command::Comment {
            slug: positional(&args, 2, "article slug")?,
            text: positional(&args, 3, "comment text")?,
        }),

        "like" => Ok(Command::Like {
            slug: positional(&args, 2, "article slug")?,
        }),

        "mine" => Ok(Command::Mine),
        "favorites" | "favs" => Ok(Command::Favorites),

        "profile" => Ok(Command::Profile {
            username: flag_value(&args, "--username", "-u"),
            email: flag_value(&args, "--email", "-e"),
        }),

        "stats" => Ok(Command::Stats),

        "ai" => match args.get(2).map(String::as_str) {
            Some("generate" | "gen") => {
                let style = match flag_value(&args, "--style", "-s") {
                    Some(s) => WritingStyle::from_str(&s)
                        .ok_or_else(|| anyhow::anyhow!("Unknown style: {s}"))?,
                    None => WritingStyle::default(),
                };
                Ok(Command::Generate {
                    topic: positional(&args, 3, "topic")?,
                    style,
                    publish: args.iter().any(|a| a == "--publish"),
                })
            }
            Some("analytics") => Ok(Command::Analytics),
            Some("recommend") => Ok(Command::Recommend),
            _ => Err(anyhow::anyhow!(
                "Usage: newsroom ai <generate|analytics|recommend>"
            )),
        },

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'newsroom --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
📰 Newsroom - publish and read articles from your terminal

USAGE:
    newsroom                               List articles
    newsroom [COMMAND]

COMMANDS:
    ping                                   Check the backend is reachable
    login <email> [password]               Log in (prompts for the password)
    register <username> <email> [password] Create an account
    logout                                 Forget the stored session
    whoami                                 Show the signed-in user

    articles [OPTIONS]                     List articles
      Options:
        -q, --search <text>                Filter by title, content or author
        -c, --category <name>              Filter by category
        -s, --sort <order>                 newest, oldest, views, likes, comments
    show <slug>                            Show an article with its comments
    post <title> <content> [-c <cat>]      Publish an article
    edit <slug> [-t <title>] [-b <body>] [-c <cat>]
                                           Edit an article
    delete <slug>                          Delete an article
    comment <slug> <text>                  Comment on an article
    like <slug>                            Like or unlike an article

    mine                                   Your articles
    favorites                              Articles you liked
    profile [-u <name>] [-e <email>]       Show or update your profile
    stats                                  Articles per week

    ai generate <topic> [-s <style>] [--publish]
                                           Draft an article with AI
    ai analytics                           AI insights on your articles
    ai recommend                           Reading recommendations

OPTIONS:
    -h, --help                             Show this help message
    -v, --version                          Show version information

ENVIRONMENT:
    NEWSROOM_API_URL                       Override the backend base URL
    RUST_LOG                               Log level (default: warn)

CONFIG:
    {}
"#,
        newsroom::LOGO,
        config_path
    );
}

fn print_version() {
    println!("newsroom {}", newsroom::VERSION);
}

/// Read a line from stdin after printing `prompt`
fn prompt(prompt: &str) -> Result<String> {
    println!("{prompt}");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn run(api: &ApiClient, config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Ping => {
            let info = api.test_connection().await?;
            println!("✓ Connected to {}", api.base_url());
            if let Some(message) = info.get("message").and_then(|m| m.as_str()) {
                println!("  {message}");
            }
        }

        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password:")?,
            };
            let response = api.login(&email, &password).await?;
            println!("✓ Logged in as {}", response.user.username);
        }

        Command::Register {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Choose a password:")?,
            };
            let response = api.register(&username, &email, &password).await?;
            println!("✓ Registered as {}", response.user.username);
        }

        Command::Logout => {
            api.logout()?;
            println!("✓ Logged out");
        }

        Command::Whoami => match api.check_auth().await {
            Ok(user) => println!("{} <{}>", user.username, user.email),
            Err(_) => println!("Not logged in."),
        },

        Command::Articles {
            query,
            category,
            sort,
        } => {
            let mut filter = FeedFilter::from_config(config);
            if let Some(query) = query {
                filter.query = query;
            }
            if let Some(category) = category {
                filter.category = category;
            }
            if let Some(sort) = sort {
                filter.sort = sort;
            }

            let mut home = HomeScreen::new(filter);
            if home.refresh(api, Trigger::Mount).await != Applied::Updated {
                anyhow::bail!(
                    "{}",
                    home.articles.error().unwrap_or("Could not load articles")
                );
            }
            let articles = home.visible();
            if articles.is_empty() {
                println!("No articles found.");
            }
            for article in &articles {
                print_summary(article);
            }
        }

        Command::Show { slug } => show_article(api, &slug).await?,

        Command::Post {
            title,
            content,
            category,
        } => {
            let mut draft = ArticleDraft::new(&title, &content);
            if let Some(category) = category {
                draft = draft.with_category(&category);
            }
            let article = api.create_article(&draft).await?;
            println!("✓ Published: {}", article.slug);
        }

        Command::Edit {
            slug,
            title,
            content,
            category,
        } => {
            let mut draft = api.get_article(&slug).await?.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            let article = api.update_article(&slug, &draft).await?;
            println!("✓ Updated: {}", article.title);
        }

        Command::Delete { slug } => {
            let message = api.delete_article(&slug).await?;
            println!("✓ {}", message.message);
        }

        Command::Comment { slug, text } => {
            let comment = api.add_comment(&slug, &text).await?;
            println!("✓ Commented as {}", comment.author());
        }

        Command::Like { slug } => {
            let toggle = api.toggle_like(&slug).await?;
            println!(
                "♥ {} ({})",
                toggle.likes_count,
                toggle.message.as_deref().unwrap_or("done")
            );
        }

        Command::Mine => print_list(api, ListSource::Mine).await?,
        Command::Favorites => print_list(api, ListSource::Favorites).await?,

        Command::Profile { username, email } => {
            let user = api.get_profile().await?;
            if username.is_some() || email.is_some() {
                let mut update = ProfileUpdate::from_user(&user);
                if let Some(username) = username {
                    update.username = username;
                }
                if let Some(email) = email {
                    update.email = email;
                }
                let user = api.update_profile(&update).await?;
                println!("✓ Profile updated: {} <{}>", user.username, user.email);
            } else {
                println!("{} <{}>", user.username, user.email);
                println!(
                    "  {} articles · {} likes · {} comments",
                    user.articles_count.unwrap_or(0),
                    user.likes_count.unwrap_or(0),
                    user.comments_count.unwrap_or(0)
                );
            }
        }

        Command::Stats => {
            let mut screen = StatisticsScreen::new();
            let applied = screen
                .refresh(api, Trigger::Mount, Local::now().date_naive())
                .await;
            if applied == Applied::SignedOut {
                anyhow::bail!("Not logged in. Run: newsroom login <email>");
            }
            if let Some(notice) = screen.weeks.error() {
                eprintln!("⚠ {notice}");
            }
            let weeks = screen.weeks.data().cloned().unwrap_or_default();
            let widest = weeks.iter().map(|w| w.count).max().unwrap_or(0).max(1);
            for week in &weeks {
                let bar = "█".repeat(week.count * 30 / widest);
                println!("{:<14} {:>3} {}", week.label(), week.count, bar);
            }
            let summary = screen.summary();
            println!(
                "\nTotal: {} · Average per week: {:.1}",
                summary.total, summary.average
            );
            if let Some(busiest) = summary.busiest {
                println!("Busiest week: {}", busiest.label());
            }
        }

        Command::Generate {
            topic,
            style,
            publish,
        } => {
            let mut request = GenerateRequest::new(&topic);
            request.style = style;
            let draft = assistant::generate(api, &request).await?;
            if let Some(notice) = &draft.notice {
                eprintln!("⚠ {notice}");
            }
            println!("{}\n", draft.title);
            println!("{}", textwrap::fill(&draft.content, WRAP_WIDTH));
            if publish {
                let article = api
                    .create_article(&draft.to_article_draft(style.name()))
                    .await?;
                println!("\n✓ Published: {}", article.slug);
            }
        }

        Command::Analytics => {
            let (count, report) = statistics::ai_analytics(api).await?;
            println!("Analysed {count} articles\n");
            println!("{}\n", textwrap::fill(&report.insights, WRAP_WIDTH));
            println!("{}", textwrap::fill(&report.recommendations, WRAP_WIDTH));
            println!(
                "\nViews: {} total · {:.1} per article",
                report.stats.total_views, report.stats.avg_views
            );
        }

        Command::Recommend => {
            for title in HomeScreen::recommendation_titles(api).await {
                println!("• {title}");
            }
        }

        Command::Help | Command::Version => {}
    }

    Ok(())
}

fn print_summary(article: &Article) {
    let date = article
        .created_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    println!("\n{} [{}]", article.title, article.slug);
    println!("  {} · {} · {}", article.author(), article.category, date);
    println!("  {}", article.preview(120));
    println!(
        "  👁 {}  ♥ {}  💬 {}",
        article.views, article.likes_count, article.comments_count
    );
}

async fn show_article(api: &ApiClient, slug: &str) -> Result<()> {
    let mut screen = newsroom::screens::article::ArticleScreen::new(slug);
    if screen.refresh(api, Trigger::Mount).await != Applied::Updated {
        anyhow::bail!(
            "{}",
            screen.article.error().unwrap_or("Could not load the article")
        );
    }
    let Some(article) = screen.article.data() else {
        return Ok(());
    };

    println!("{}", article.title);
    println!("{}", "─".repeat(WRAP_WIDTH.min(article.title.chars().count().max(20))));
    println!("by {} · {}", article.author(), article.category);
    if let Some((lat, lng)) = article.location() {
        println!("📍 {lat:.4}, {lng:.4}");
    }
    println!("\n{}\n", textwrap::fill(&article.content, WRAP_WIDTH));
    println!(
        "👁 {}  ♥ {}  💬 {}",
        article.views, article.likes_count, article.comments_count
    );

    let comments = screen.comments.data().cloned().unwrap_or_default();
    if !comments.is_empty() {
        println!("\nComments");
    }
    for comment in comments {
        let when = comment
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("\n  {} · {}", comment.author(), when);
        let options = textwrap::Options::new(WRAP_WIDTH - 4)
            .initial_indent("  ")
            .subsequent_indent("  ");
        println!("{}", textwrap::fill(&comment.text, options));
    }
    Ok(())
}

async fn print_list(api: &ApiClient, source: ListSource) -> Result<()> {
    let mut screen = ArticleListScreen::new(source);
    match screen.refresh(api, Trigger::Mount).await {
        Applied::Updated => {}
        Applied::SignedOut => anyhow::bail!("Not logged in. Run: newsroom login <email>"),
        _ => anyhow::bail!(
            "{}",
            screen.articles.error().unwrap_or("Could not load articles")
        ),
    }
    let articles = screen.articles.data().cloned().unwrap_or_default();
    println!("{} ({})", source.title(), articles.len());
    for article in &articles {
        print_summary(article);
    }
    Ok(())
}
