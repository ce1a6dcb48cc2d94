//! The document written when the data file does not exist yet.

use crate::domain::model::{Product, ProductStatus, Profile};
use crate::storage::Document;

#[allow(clippy::too_many_arguments)]
fn product(
    name: &str,
    description: &str,
    status: ProductStatus,
    price: &str,
    stock: u32,
    date: &str,
    image: &str,
    ai_hint: &str,
) -> Product {
    Product {
        name: name.to_string(),
        description: description.to_string(),
        status,
        price: price.to_string(),
        stock,
        date: date.to_string(),
        image: image.to_string(),
        ai_hint: ai_hint.to_string(),
    }
}

pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "Hand-painted Madhubani Saree",
            "A beautiful Tussar silk saree, hand-painted with traditional Madhubani motifs depicting tales of nature and mythology.",
            ProductStatus::Active,
            "₹8,999",
            25,
            "2023-07-12 10:42 AM",
            "https://picsum.photos/100/100?random=1",
            "painted saree",
        ),
        product(
            "Terracotta Horse Statue",
            "A rustic terracotta horse, symbolizing power and grace, handcrafted by artisans from Panchmura village.",
            ProductStatus::Active,
            "₹3,499",
            8,
            "2023-10-18 03:21 PM",
            "https://picsum.photos/100/100?random=2",
            "terracotta statue",
        ),
        product(
            "Warli Art Coasters (Set of 4)",
            "Set of four wooden coasters, hand-painted with intricate Warli art, perfect for adding a touch of ethnic charm to your home.",
            ProductStatus::Draft,
            "₹999",
            100,
            "2024-01-05 09:12 AM",
            "https://picsum.photos/100/100?random=3",
            "art coasters",
        ),
        product(
            "Pashmina Shawl with Sozni Embroidery",
            "An exquisite Pashmina shawl from Kashmir featuring delicate Sozni hand-embroidery. A timeless piece of wearable art.",
            ProductStatus::Archived,
            "₹15,000",
            0,
            "2022-11-29 01:55 PM",
            "https://picsum.photos/100/100?random=4",
            "pashmina shawl",
        ),
    ]
}

pub fn seed_profile() -> Profile {
    Profile {
        name: "Ravi Kumar".to_string(),
        location: "Jaipur, Rajasthan".to_string(),
        story: "I am a third-generation block-printer from Jaipur, keeping the traditions of my family alive through vibrant textiles...".to_string(),
        heritage: "Sanganeri block-printing is a traditional art form from Rajasthan, known for its delicate floral patterns and use of natural dyes.".to_string(),
    }
}

pub fn seed_document() -> Document {
    Document {
        products: seed_products(),
        profile: seed_profile(),
    }
}
