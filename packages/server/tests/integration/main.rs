mod events;
mod members;
mod news;
mod tracks;
mod web;
