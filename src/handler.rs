// Rocket routes for the Battlesnake webhook API.
// Each route unpacks the request and hands the pieces to the Bot.

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

use minimax_snake::bot::Bot;
use minimax_snake::types::GameState;

/// Appearance and API version
#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

#[post("/start", format = "json", data = "<req>")]
pub fn start(bot: &State<Bot>, req: Json<GameState>) -> Status {
    let GameState { game, turn, board, you } = req.into_inner();
    bot.start(&game, &turn, &board, &you);
    Status::Ok
}

/// Decides this turn's direction: `{"move": "up" | "down" | "left" | "right"}`
#[post("/move", format = "json", data = "<req>")]
pub async fn get_move(bot: &State<Bot>, req: Json<GameState>) -> Json<Value> {
    let GameState { game, turn, board, you } = req.into_inner();
    Json(bot.get_move(&game, &turn, &board, &you).await)
}

#[post("/end", format = "json", data = "<req>")]
pub fn end(bot: &State<Bot>, req: Json<GameState>) -> Status {
    let GameState { game, turn, board, you } = req.into_inner();
    bot.end(&game, &turn, &board, &you);
    Status::Ok
}
