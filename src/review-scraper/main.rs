use clap::Parser;
use rscr::{
    config::{CrawlConfig, DbConfig},
    crawl::Crawler,
};

/// Crawl the review listing once and store every new review.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(flatten)]
    crawl: CrawlConfig,

    #[command(flatten)]
    db: DbConfig,

    /// Create the review table before crawling, if it does not exist yet.
    #[arg(long)]
    init_schema: bool,

    /// Print the identified batch as JSON instead of storing it.
    #[arg(long, conflicts_with = "init_schema")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let args = Args::parse();
    let crawler = Crawler::new(args.crawl);

    if args.dry_run {
        let batch = crawler.collect().await?;
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    let pool = rscr::db::connect(&args.db).await?;
    if args.init_schema {
        rscr::db::init_schema(&*pool.get().await?).await?;
    }

    let outcome = crawler.run(&pool).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
