mod test_content;
mod test_gallery;
