mod helpers;
mod pipeline;
mod wordcount;
