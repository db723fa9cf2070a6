pub mod bmp;
pub mod sprite_art;
