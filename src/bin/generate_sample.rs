use std::collections::BTreeMap;

use serde::Serialize;

/// One event as written to `lookups.json`.
#[derive(Serialize)]
struct SampleEvent {
    uid: u64,
    name: String,
    category: &'static str,
    keywords: Vec<&'static str>,
    city: &'static str,
    zip_code: &'static str,
    month: &'static str,
    description: String,
    website: String,
    social_media: BTreeMap<&'static str, String>,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }
}

const CATEGORIES: [&str; 6] = ["Anime", "Comics", "Gaming", "Horror", "Sci-Fi", "Toys"];

const CITIES: [(&str, &str); 7] = [
    ("Austin", "78701"),
    ("Dallas", "75201"),
    ("El Paso", "79901"),
    ("Fort Worth", "76102"),
    ("Houston", "77002"),
    ("Lubbock", "79401"),
    ("San Antonio", "78205"),
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const KEYWORDS: [&str; 10] = [
    "cosplay", "artists", "panels", "signing", "vendors",
    "tabletop", "screenings", "workshops", "family", "tournaments",
];

const PLATFORMS: [&str; 4] = ["instagram", "facebook", "twitter", "youtube"];

fn main() {
    let mut rng = SimpleRng::new(42);
    let count = 60;

    let events: Vec<SampleEvent> = (0..count)
        .map(|i| {
            let category = rng.pick(&CATEGORIES);
            let (city, zip_code) = rng.pick(&CITIES);
            let month = rng.pick(&MONTHS);

            let mut keywords = Vec::new();
            for _ in 0..=rng.below(4) {
                let keyword = rng.pick(&KEYWORDS);
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }

            let slug = format!("{}-{}-{i}", category, city)
                .to_ascii_lowercase()
                .replace(' ', "-");
            let social_media = PLATFORMS
                .iter()
                .filter(|_| rng.below(3) != 0)
                .map(|p| (*p, format!("https://{p}.com/{slug}")))
                .collect();

            SampleEvent {
                uid: i as u64 + 1,
                name: format!("{city} {category} Con #{}", i + 1),
                category,
                keywords,
                city,
                zip_code,
                month,
                description: format!(
                    "A {} gathering in {city}, usually held in {month}.",
                    category.to_lowercase()
                ),
                website: format!("https://{slug}.example.com"),
                social_media,
            }
        })
        .collect();

    let output_path = "lookups.json";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    serde_json::to_writer_pretty(file, &events).expect("Failed to write events");

    println!("Wrote {} events to {output_path}", events.len());
}
