#[actix_web::main]
async fn main() -> std::io::Result<()> {
    autodocs_server::run().await
}
