#[actix_web::main]
async fn main() -> std::io::Result<()> {
    name_picker::run().await.map_err(std::io::Error::other)
}
