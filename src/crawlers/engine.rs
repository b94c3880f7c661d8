use crate::config::CrawlerConfig;
use crate::crawlers::source::PageSource;
use crate::error::Result;
use crate::filter::NameFilter;
use crate::profile::ProfileFetcher;
use crate::results::Snapshot;
use std::collections::VecDeque;

/// Breadth-first crawl over the related-people graph.
///
/// Fetches run one at a time; the dedup check on enqueue relies on that.
pub struct CrawlEngine<'a, S: PageSource> {
    source: &'a S,
    config: &'a CrawlerConfig,
    filter: NameFilter,
}

impl<'a, S: PageSource> CrawlEngine<'a, S> {
    pub fn new(source: &'a S, config: &'a CrawlerConfig) -> Result<Self> {
        let filter = NameFilter::from_config(config)?;
        Ok(Self {
            source,
            config,
            filter,
        })
    }

    /// Crawls every profile reachable from `seed`.
    ///
    /// Any fetch or parse failure aborts the whole crawl.
    pub async fn crawl(&self, seed: &str) -> Result<Snapshot> {
        ::log::info!("Starting crawl from {}", seed);

        let mut queue = VecDeque::from([seed.to_string()]);
        let mut people = Snapshot::new();

        while let Some(name) = queue.pop_front() {
            if people.contains(&name) {
                ::log::warn!("{} already visited", name);
                continue;
            }

            if let Some(limit) = self.config.max_profiles {
                if people.len() >= limit {
                    ::log::info!(
                        "Reached max_profiles ({}), {} names left in queue",
                        limit,
                        queue.len() + 1
                    );
                    break;
                }
            }

            if name != seed && !self.filter.should_crawl(&name) {
                ::log::debug!("Name filter rejected: {}", name);
                continue;
            }

            ::log::debug!(">>> {} (queue: {})", name, queue.len());
            let fetcher = ProfileFetcher::new(&name, self.config, self.source)?;
            let record = fetcher.to_record().await?;
            let related = record.related_names().to_vec();
            people.insert(record);
            let discovered = unseen(&related, &queue, &people);
            queue.extend(discovered);
        }

        ::log::info!("Crawl complete - {} profiles", people.len());
        Ok(people)
    }
}

/// Related names that are neither recorded nor waiting in the queue.
///
/// The queue is checked as it stood before this batch, so a name listed twice
/// by one profile is queued twice and the second copy is skipped on dequeue.
fn unseen(related: &[String], queue: &VecDeque<String>, people: &Snapshot) -> Vec<String> {
    related
        .iter()
        .filter(|next| !people.contains(next.as_str()) && !queue.contains(*next))
        .inspect(|next| ::log::trace!("Queuing {}", next))
        .cloned()
        .collect()
}
