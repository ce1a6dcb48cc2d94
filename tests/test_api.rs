//! End-to-end tests over HTTP with a scripted AI model.

mod common;

use common::{StubModel, TestServer, ROOM_JPG, TINY_PNG};
use kalaconnect::infra::genai::{Part, ResponseFormat};
use reqwest::Method;
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_products_listing_and_status_filter() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let (status, all) = server.get("/api/products").await?;
    assert_eq!(status, 200);
    assert_eq!(all["data"].as_array().map(|a| a.len()), Some(4));

    let (_, active) = server.get("/api/products?status=active").await?;
    let names: Vec<&str> = active["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Hand-painted Madhubani Saree", "Terracotta Horse Statue"]);

    let (_, parts) = server.get("/api/products/partition").await?;
    assert_eq!(parts["data"]["active"].as_array().unwrap().len(), 2);
    assert_eq!(parts["data"]["draft"][0]["name"], "Warli Art Coasters (Set of 4)");
    assert_eq!(parts["data"]["archived"][0]["status"], "Archived");

    let (status, bad) = server.get("/api/products?status=sold").await?;
    assert_eq!(status, 400);
    assert_eq!(bad["success"], false);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_save_product_is_draft_and_first() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let (status, saved) = server
        .post(
            "/api/products",
            json!({
                "name": "Dhokra Elephant",
                "description": "Lost-wax cast brass elephant from Bastar.",
                "price": "1,800",
                "currency": "₹",
                "stock": 6,
                "image": TINY_PNG,
                "aiHint": "brass elephant"
            }),
        )
        .await?;
    assert_eq!(status, 200, "{}", saved);
    assert_eq!(saved["data"]["status"], "Draft");
    assert_eq!(saved["data"]["price"], "₹1,800");
    assert!(!saved["data"]["date"].as_str().unwrap_or_default().is_empty());

    let (_, all) = server.get("/api/products").await?;
    assert_eq!(all["data"][0]["name"], "Dhokra Elephant");
    assert_eq!(all["data"].as_array().unwrap().len(), 5);

    // Drafts never show up for buyers.
    let (_, explore) = server.get("/api/products/explore").await?;
    assert!(explore["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["status"] == "Active"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_profile_validation_and_round_trip() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let (_, seeded) = server.get("/api/profile").await?;
    assert_eq!(seeded["data"]["name"], "Ravi Kumar");

    let short = server
        .client
        .put(server.url("/api/profile"))
        .json(&json!({"name": "R", "location": "J", "story": "short", "heritage": "short"}))
        .send()
        .await?;
    assert_eq!(short.status().as_u16(), 400);
    let body: serde_json::Value = short.json().await?;
    assert_eq!(body["data"]["errors"].as_array().map(|e| e.len()), Some(4));

    let profile = json!({
        "name": "Lakshmi Iyer",
        "location": "Kanchipuram, Tamil Nadu",
        "story": "My family has woven silk on pit looms for five generations.",
        "heritage": "Kanjeevaram silk is known for its heavy zari borders and temple motifs."
    });
    let res = server.client.put(server.url("/api/profile")).json(&profile).send().await?;
    assert_eq!(res.status().as_u16(), 200);

    let (_, read_back) = server.get("/api/profile").await?;
    assert_eq!(read_back["data"], profile);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_malformed_body_is_422() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let res = server
        .client
        .post(server.url("/api/ai/chatbot"))
        .header("content-type", "application/json")
        .body("{\"question\": 1}")
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 422);
    let body: serde_json::Value = res.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid JSON body"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_description_flow_forwards_form_fields() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let (status, body) = server
        .post(
            "/api/ai/product-description",
            json!({
                "productImageUri": TINY_PNG,
                "productName": "Blue Pottery Vase",
                "artisanCulture": "Jaipur potters",
                "craftTechniques": "Quartz paste, hand painted",
                "productMaterials": "Quartz, glass, cobalt",
                "productDimensions": "30cm",
                "productRegion": "Rajasthan"
            }),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(
        body["data"]["productDescription"],
        "stub reply for generateProductDescription"
    );

    let requests = server.model.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.format, ResponseFormat::Text);
    match &req.parts[0] {
        Part::Text(prompt) => {
            assert!(prompt.contains("Product Name: Blue Pottery Vase"));
            assert!(prompt.contains("Craft Techniques: Quartz paste, hand painted"));
            assert!(prompt.contains("Product Region: Rajasthan"));
        }
        other => panic!("expected prompt text first, got {:?}", other),
    }
    assert_eq!(req.parts[1], Part::media(TINY_PNG));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_description_validation_happens_before_any_call() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let (status, body) = server
        .post(
            "/api/ai/product-description",
            json!({
                "productImageUri": "not-an-image",
                "productName": "Va",
                "artisanCulture": "Jaipur potters",
                "craftTechniques": "Quartz paste",
                "productMaterials": "Quartz",
                "productDimensions": "30cm",
                "productRegion": "Rajasthan"
            }),
        )
        .await?;
    assert_eq!(status, 400);
    let fields: Vec<&str> = body["data"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["productName", "productImageUri"]);
    assert!(server.model.requests().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_marketing_flow_parses_structured_output() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let (status, body) = server
        .post(
            "/api/ai/marketing-content",
            json!({
                "productName": "Terracotta Horse Statue",
                "productDescription": "A rustic terracotta horse from Panchmura village.",
                "artisanName": "Ravi Kumar",
                "cultureHeritage": "Bankura district of West Bengal",
                "targetAudience": "Art lovers, people interested in Indian culture"
            }),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["socialMediaPost"], "Stub post #handmade");
    assert_eq!(body["data"]["emailCampaign"], "Dear patron, ...");
    assert_eq!(server.model.requests()[0].format, ResponseFormat::Json);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_provider_failure_becomes_generic_error() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::failing()).await?;

    let (status, body) = server
        .post("/api/ai/chatbot", json!({ "query": "How do I list a product?" }))
        .await?;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Sorry, I am having trouble connecting. Please try again later."
    );
    // Exactly one attempt: no retries.
    assert_eq!(server.model.requests().len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_chatbot_uses_onboarding_system_prompt() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let (status, body) = server
        .post("/api/ai/chatbot", json!({ "query": "What fees do artisans pay?" }))
        .await?;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["response"], "stub reply for getChatbotAssistance");

    let req = &server.model.requests()[0];
    assert!(req.system.as_deref().unwrap_or_default().contains("KalaConnect"));
    assert_eq!(
        req.parts,
        vec![Part::text(
            "Answer the following question about the platform:\n\nWhat fees do artisans pay?"
        )]
    );

    let (status, _) = server.post("/api/ai/chatbot", json!({ "query": "   " })).await?;
    assert_eq!(status, 400);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_visualize_uses_stored_product_image() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let (status, body) = server
        .post(
            "/api/ai/visualize",
            json!({ "productName": "Terracotta Horse Statue", "roomImageUri": ROOM_JPG }),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["generatedImageUri"], "data:image/png;base64,Y29tcG9zZWQ=");

    let req = &server.model.requests()[0];
    assert_eq!(req.format, ResponseFormat::Image);
    assert_eq!(req.parts[0], Part::media("https://picsum.photos/100/100?random=2"));
    assert_eq!(req.parts[1], Part::media(ROOM_JPG));

    // Draft products cannot be visualized.
    let (status, _) = server
        .post(
            "/api/ai/visualize",
            json!({ "productName": "Warli Art Coasters (Set of 4)", "roomImageUri": ROOM_JPG }),
        )
        .await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_visualize_without_image_output_fails() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::with_reply(|_| {
        Ok(kalaconnect::infra::genai::GenerateResponse {
            parts: vec![Part::text("I cannot do that")],
        })
    }))
    .await?;
    let (status, body) = server
        .post(
            "/api/ai/visualize",
            json!({ "productName": "Hand-painted Madhubani Saree", "roomImageUri": ROOM_JPG }),
        )
        .await?;
    assert_eq!(status, 502);
    assert_eq!(body["error"], "Failed to visualize product. Please try again.");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cart_and_simulated_checkout() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    // No session header.
    let (status, _) = server.get("/api/cart").await?;
    assert_eq!(status, 401);

    let token = server.login("buyer").await?;
    for name in ["Hand-painted Madhubani Saree", "Terracotta Horse Statue", "Terracotta Horse Statue"] {
        let (status, body) = server
            .with_session(Method::POST, "/api/cart/items", &token, Some(json!({ "name": name })))
            .await?;
        assert_eq!(status, 200, "{}", body);
    }

    // Only Active products can be added.
    let (status, _) = server
        .with_session(
            Method::POST,
            "/api/cart/items",
            &token,
            Some(json!({ "name": "Pashmina Shawl with Sozni Embroidery" })),
        )
        .await?;
    assert_eq!(status, 404);

    let (_, cart) = server.with_session(Method::GET, "/api/cart", &token, None).await?;
    assert_eq!(cart["data"]["count"], 3);
    assert_eq!(cart["data"]["subtotal"], 8999.0 + 3499.0 * 2.0);

    // Removing by name drops both horses.
    let (status, cart) = server
        .with_session(Method::DELETE, "/api/cart/items/Terracotta%20Horse%20Statue", &token, None)
        .await?;
    assert_eq!(status, 200, "{}", cart);
    assert_eq!(cart["data"]["count"], 1);
    assert_eq!(cart["data"]["subtotalDisplay"], "₹8999.00");

    let form = json!({
        "name": "Asha Rao",
        "address": "12 MG Road",
        "city": "Pune",
        "pincode": "411001",
        "cardName": "Asha Rao",
        "cardNumber": "4111111111111111",
        "cardExpiry": "13/27",
        "cardCvc": "123"
    });
    let (status, body) = server
        .with_session(Method::POST, "/api/checkout", &token, Some(form.clone()))
        .await?;
    assert_eq!(status, 400);
    assert_eq!(body["data"]["errors"][0]["field"], "cardExpiry");

    let mut good = form;
    good["cardExpiry"] = json!("09/27");
    let (status, order) = server
        .with_session(Method::POST, "/api/checkout", &token, Some(good.clone()))
        .await?;
    assert_eq!(status, 200, "{}", order);
    assert!(order["data"]["orderId"].as_str().unwrap().starts_with("KC-"));
    assert_eq!(order["data"]["subtotal"], 8999.0);
    assert_eq!(order["data"]["cardLast4"], "1111");

    let (_, cart) = server.with_session(Method::GET, "/api/cart", &token, None).await?;
    assert_eq!(cart["data"]["count"], 0);

    // Second checkout has nothing to pay for.
    let (status, body) = server
        .with_session(Method::POST, "/api/checkout", &token, Some(good))
        .await?;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Your cart is empty.");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_logout_keeps_cart_and_dashboard_follows_role() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let artisan = server.login("artisan").await?;
    let (status, dash) = server.with_session(Method::GET, "/api/dashboard", &artisan, None).await?;
    assert_eq!(status, 200);
    assert_eq!(dash["data"]["role"], "artisan");
    assert_eq!(dash["data"]["summary"]["active"], 2);

    let buyer = server.login("buyer").await?;
    let (_, dash) = server.with_session(Method::GET, "/api/dashboard", &buyer, None).await?;
    assert_eq!(dash["data"]["role"], "buyer");
    assert_eq!(dash["data"]["featured"].as_array().unwrap().len(), 2);

    server
        .with_session(
            Method::POST,
            "/api/cart/items",
            &buyer,
            Some(json!({ "name": "Terracotta Horse Statue" })),
        )
        .await?;
    let (status, session) = server
        .with_session(Method::POST, "/api/session/logout", &buyer, None)
        .await?;
    assert_eq!(status, 200);
    assert_eq!(session["data"]["loggedIn"], false);
    assert_eq!(session["data"]["cart"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = server.with_session(Method::GET, "/api/dashboard", &buyer, None).await?;
    assert_eq!(status, 401);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    let (status, body) = server.get("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "ok");
    assert!(server.db_path.exists());

    use utoipa::OpenApi;
    let doc = serde_json::to_value(kalaconnect::transport::http::ApiDoc::openapi())?;
    assert!(doc["paths"].get("/api/checkout").is_some());
    assert!(doc["paths"].get("/api/ai/visualize").is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_uploaded_images_must_be_inline() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;

    let (status, body) = server
        .post(
            "/api/ai/product-description",
            json!({
                "productImageUri": "http://169.254.169.254/latest/meta-data/",
                "productName": "Blue Pottery Vase",
                "artisanCulture": "Jaipur potters",
                "craftTechniques": "Quartz paste",
                "productMaterials": "Quartz",
                "productDimensions": "30cm",
                "productRegion": "Rajasthan"
            }),
        )
        .await?;
    assert_eq!(status, 400);
    assert_eq!(body["data"]["errors"][0]["field"], "productImageUri");

    let (status, body) = server
        .post(
            "/api/ai/visualize",
            json!({
                "productName": "Terracotta Horse Statue",
                "roomImageUri": "http://127.0.0.1:22/"
            }),
        )
        .await?;
    assert_eq!(status, 400);
    assert_eq!(body["data"]["errors"][0]["field"], "roomImageUri");

    assert!(server.model.requests().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_store_failures_use_generic_messages() -> anyhow::Result<()> {
    let server = TestServer::start(StubModel::happy()).await?;
    // A directory where the data file should be: every read fails with an IO error.
    std::fs::create_dir(&server.db_path)?;

    let res = server
        .client
        .put(server.url("/api/profile"))
        .json(&json!({
            "name": "Lakshmi Iyer",
            "location": "Kanchipuram",
            "story": "Five generations of pit-loom silk weaving.",
            "heritage": "Kanjeevaram silk with temple motifs."
        }))
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 500);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to save profile.");

    let (status, body) = server
        .post(
            "/api/products",
            json!({
                "name": "Dhokra Elephant",
                "description": "Lost-wax cast brass elephant.",
                "price": "₹1,800",
                "stock": 6,
                "image": TINY_PNG
            }),
        )
        .await?;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to save the product.");

    let (status, body) = server.get("/api/products").await?;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Could not fetch products.");

    let (status, _) = server.get("/health").await?;
    assert_eq!(status, 503);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_buyer_dashboard_features_first_four_active() -> anyhow::Result<()> {
    use kalaconnect::storage::{seed::seed_profile, Document, JsonStore};
    use kalaconnect::{Product, ProductStatus};

    let server = TestServer::start(StubModel::happy()).await?;
    let product = |i: usize, status: ProductStatus| Product {
        name: format!("Item {}", i),
        description: "Handmade".to_string(),
        status,
        price: "₹100".to_string(),
        stock: 1,
        date: "2024-01-01 10:00 AM".to_string(),
        image: TINY_PNG.to_string(),
        ai_hint: String::new(),
    };
    let products = vec![
        product(1, ProductStatus::Draft),
        product(2, ProductStatus::Active),
        product(3, ProductStatus::Active),
        product(4, ProductStatus::Archived),
        product(5, ProductStatus::Active),
        product(6, ProductStatus::Active),
        product(7, ProductStatus::Active),
        product(8, ProductStatus::Active),
    ];
    JsonStore::new(&server.db_path)
        .write_db(&Document {
            products,
            profile: seed_profile(),
        })
        .await?;

    let buyer = server.login("buyer").await?;
    let (status, dash) = server.with_session(Method::GET, "/api/dashboard", &buyer, None).await?;
    assert_eq!(status, 200, "{}", dash);
    let featured: Vec<&str> = dash["data"]["featured"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(featured, vec!["Item 2", "Item 3", "Item 5", "Item 6"]);
    Ok(())
}
