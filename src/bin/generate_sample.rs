use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn pick<'a>(rng: &mut SimpleRng, items: &[&'a str]) -> &'a str {
    items[rng.below(items.len() as u64) as usize]
}

/// Format a whole-dollar amount the way the source data does: `$5,320`.
fn format_amount(amount: u64) -> String {
    let digits: Vec<char> = amount.to_string().chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    format!("${grouped}")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let sales_people = [
        "Jehu Rudeforth",
        "Van Tuxwell",
        "Gigi Bohling",
        "Jan Morforth",
        "Madelene Upcott",
        "Oby Sorrel",
        "Brien Boise",
        "Dennison Crosswaite",
    ];
    let countries = ["Australia", "Canada", "India", "New Zealand", "UK", "USA"];
    let products = [
        "Mint Chip Choco",
        "85% Dark Bars",
        "Peanut Butter Cubes",
        "Smooth Silky Salty",
        "50% Dark Bites",
        "White Choc",
        "Milk Bars",
        "Organic Choco Syrup",
        "Caramel Stuffed Bars",
        "Drinking Coco",
    ];

    let rows = 700;
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).context("invalid start date")?;

    let output_path = "Chocolate Sales.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "Sales Person",
        "Country",
        "Product",
        "Date",
        "Amount",
        "Boxes Shipped",
    ])?;

    for _ in 0..rows {
        let person = pick(&mut rng, &sales_people);
        let country = pick(&mut rng, &countries);
        let product = pick(&mut rng, &products);

        let date = start + Days::new(rng.below(365));
        let boxes = 1 + rng.below(450) as u32;
        let unit_price = rng.gauss(12.0, 4.0).clamp(2.0, 30.0);
        let amount = (f64::from(boxes) * unit_price).round() as u64;

        let date = date.format("%d-%b-%y").to_string();
        let amount = format_amount(amount);
        let boxes = boxes.to_string();
        writer.write_record([
            person,
            country,
            product,
            date.as_str(),
            amount.as_str(),
            boxes.as_str(),
        ])?;
    }

    writer.flush().context("flushing output file")?;

    println!("Wrote {rows} sales records to {output_path}");
    Ok(())
}
