pub mod player_bar;
