use clap::Subcommand;
use an_core::{pipeline, ListParams, ListQuery, Result};

use crate::scrapers::{http_client, ArticleExtractor, FeedFetcher};

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Fetch the feed once and print one page of it as JSON
    Feed {
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        limit: Option<String>,
        /// none, date or title
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Extract the readable content of a web page and print it as JSON
    Extract {
        url: String,
    },
}

pub async fn handle_command(command: ScraperCommands, feed_url: &str) -> Result<()> {
    let client = http_client()?;

    let output = match command {
        ScraperCommands::Feed { page, limit, sort, search } => {
            let query = ListQuery::try_from(ListParams { page, limit, sort, search })?;
            let articles = FeedFetcher::new(client, feed_url).fetch_feed().await?;
            serde_json::to_string_pretty(&pipeline::apply(articles, &query))?
        }
        ScraperCommands::Extract { url } => {
            let article = ArticleExtractor::new(client).extract(&url).await?;
            serde_json::to_string_pretty(&article)?
        }
    };

    println!("{}", output);
    Ok(())
}
