//! Per-page word-count pipeline: the crawling collaborator seen from its
//! boundary.
//!
//! Fetching is out of scope here; this module consumes page text that
//! is already on disk. For each page it builds a FRESH hash table, dumps
//! the counts sorted by word, and finally merges all dumps. No container
//! ever crosses a thread boundary: a worker owns its map for the
//! duration of one page, so the single-owner rule of the containers is
//! upheld by construction.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{debug, info};

use crate::chain_hash_map::ChainHashMap;
use crate::persist::PersistError;
use crate::wordfreq;

/// Media suffixes that never lead to an article.
const LINK_BLACKLIST: [&str; 5] = ["gif", "jpg", "svg", "png", "ogg"];

/// True when `url` plausibly points at another article. A plain textual
/// filter: `/wiki/`-prefixed, not a media file, no namespace colon, not
/// an edit or identifier link.
fn is_article_link(url: &str) -> bool {
    if !url.starts_with("/wiki/") {
        return false;
    }
    let suffix = url.rsplit('.').next().unwrap_or("").to_lowercase();
    if LINK_BLACKLIST.contains(&suffix.as_str()) {
        return false;
    }
    if url.contains(':') || url.contains("Edit") || url.ends_with("#identifiers") {
        return false;
    }
    true
}

/// Collect unique article links from `page` in first-seen order,
/// stopping after `limit` links when one is given.
///
/// This is a plain `href="…"` scan. Parsing HTML properly is explicitly
/// out of contract; the filters only need the attribute text.
pub fn extract_links(page: &str, limit: Option<usize>) -> Vec<String> {
    let mut seen: ChainHashMap<String, ()> = ChainHashMap::new();
    let mut links = Vec::new();
    for chunk in page.split("href=\"").skip(1) {
        let Some(end) = chunk.find('"') else { continue };
        let url = &chunk[..end];
        if !is_article_link(url) {
            continue;
        }
        if seen.contains_key(&url.to_string()) {
            continue;
        }
        seen.insert(url.to_string(), ());
        links.push(url.to_string());
        if limit.is_some_and(|max| links.len() >= max) {
            break;
        }
    }
    debug!("extracted {} article links", links.len());
    links
}

/// Count one page's words into a fresh table.
pub fn count_page(text: &str) -> ChainHashMap<String, u64> {
    wordfreq::count_words(text)
}

fn dump_path(page: &Path, out_dir: &Path) -> PathBuf {
    let stem = page.file_stem().and_then(|s| s.to_str()).unwrap_or("page");
    out_dir.join(format!("{stem}.words"))
}

/// Count every page with a fixed-size worker pool and write one sorted
/// dump per page into `out_dir`. Returns the dump paths in page order.
///
/// Workers pull the next page index from a shared cursor. The only state
/// shared between threads is that cursor and the read-only page list;
/// each page's table is created, filled, dumped, and dropped by a single
/// worker.
pub fn process_pages(
    pages: &[PathBuf],
    out_dir: &Path,
    workers: usize,
) -> Result<Vec<PathBuf>, PersistError> {
    fs::create_dir_all(out_dir)?;
    let cursor = AtomicUsize::new(0);
    let workers = workers.clamp(1, pages.len().max(1));
    let results: Vec<Result<(), PersistError>> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            handles.push(scope.spawn(|| -> Result<(), PersistError> {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(page) = pages.get(index) else {
                        return Ok(());
                    };
                    let text = fs::read_to_string(page)?;
                    let counts = count_page(&text);
                    let out = BufWriter::new(File::create(dump_path(page, out_dir))?);
                    wordfreq::write_sorted_counts(&counts, out)?;
                    debug!(
                        "counted {} distinct words in {}",
                        counts.len(),
                        page.display()
                    );
                }
            }));
        }
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    });
    for result in results {
        result?;
    }
    info!("processed {} pages with {} workers", pages.len(), workers);
    Ok(pages.iter().map(|page| dump_path(page, out_dir)).collect())
}

/// Merge all per-page dumps into one result file.
pub fn merge_pages(dumps: &[PathBuf], result: &Path) -> Result<(), PersistError> {
    let mut sources = Vec::with_capacity(dumps.len());
    for dump in dumps {
        sources.push(BufReader::new(File::open(dump)?));
    }
    let out = BufWriter::new(File::create(result)?);
    wordfreq::merge_sorted_counts(sources, out)?;
    info!("merged {} dumps into {}", dumps.len(), result.display());
    Ok(())
}
