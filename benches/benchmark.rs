//! Performance benchmarks for fa-extract.
//!
//! Run with: `cargo bench`
//!
//! Pages are generated in memory so listing cost can be measured at each
//! page size the site serves.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fa_extract::{extract_browse, extract_submission, PageSize};

fn browse_page(posts: u32) -> String {
    let mut cards = String::new();
    let mut entries = Vec::new();

    for id in 1..=posts {
        cards.push_str(&format!(
            r#"<figure id="sid-{id}" class="r-general t-image u-artist{id}">
                <b><u><a href="/view/{id}/"><img src="//t.furaffinity.net/{id}@200-1620000000.jpg"></a></u></b>
                <figcaption><p><a href="/view/{id}/" title="Post {id}">Post {id}</a></p></figcaption>
            </figure>"#
        ));
        entries.push(format!(
            r#""{id}": {{"title": "Post {id}", "description": "Description {id}", "username": "Artist{id}", "lower": "artist{id}"}}"#
        ));
    }

    format!(
        r#"<html><body id="pageid-browse">
            <div id="browse"><section class="gallery s-250">{cards}</section></div>
            <script>var descriptions = {{{}}};</script>
        </body></html>"#,
        entries.join(",")
    )
}

const SUBMISSION_HTML: &str = r#"<html>
<head>
  <meta property="og:url" content="https://www.furaffinity.net/view/41234567/">
  <meta property="og:image:secure_url" content="https://t.furaffinity.net/41234567@400-1620000000.jpg">
  <meta name="twitter:data2" content="General">
</head>
<body id="pageid-submission">
  <div class="classic-submission-title"><h2>Morning Walk</h2> By <a href="/user/inkpaw/">InkPaw</a></div>
  <img id="submissionImg" alt="Morning Walk" src="//d.furaffinity.net/art/inkpaw/walk.png">
  <a href="//d.furaffinity.net/art/inkpaw/walk.png">Download</a>
  <div class="stats-container">
    <b>Posted:</b> <span class="popup_date" title="May 1st, 2021 10:00 AM">3 days ago</span><br>
    <b>Category:</b> Artwork (Digital)<br>
    <b>Theme:</b> General Furry Art<br>
    <b>Favorites:</b> 1,204<br>
    <b>Comments:</b> 17<br>
    <b>Views:</b> 10532<br>
  </div>
  <div id="keywords"><a href="/search/@keywords fox">fox</a> <a href="/search/@keywords snow">snow</a></div>
  <div class="submission-description">
    <a href="/user/inkpaw/"><img class="avatar" alt="inkpaw" src="//a.furaffinity.net/inkpaw.gif"></a>
    A walk through fresh snow.
  </div>
</body>
</html>"#;

fn bench_submission(c: &mut Criterion) {
    c.bench_function("extract_submission", |b| {
        b.iter(|| extract_submission(black_box(SUBMISSION_HTML)));
    });
}

fn bench_browse_page_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("browse");

    for size in [PageSize::Small, PageSize::Medium, PageSize::Large] {
        let html = browse_page(size.count());
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", size.count()), &html, |b, html| {
            b.iter(|| extract_browse(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_submission, bench_browse_page_sizes);
criterion_main!(benches);
