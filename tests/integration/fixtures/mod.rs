// Test fixtures with known Gutenberg-style texts and pages
// WHY: deterministic inputs let offsets be asserted exactly

/// Book with a table of contents repeating its chapter headings, CRLF line endings
pub const BOOK_WITH_TOC: &str = "The Project Gutenberg eBook of A Small Tale\r\n\
\r\n\
*** START OF THE PROJECT GUTENBERG EBOOK A SMALL TALE ***\r\n\
\r\n\
\r\n\
\r\n\
CONTENTS\r\n\
\r\n\
CHAPTER ONE continues here with the arrival\r\n\
CHAPTER TWO the departure\r\n\
\r\n\
\r\n\
\r\n\
CHAPTER ONE\r\n\
\r\n\
It was a dark night, and the   rain fell\r\n\
in torrents.\r\n\
\r\n\
CHAPTER TWO\r\n\
\r\n\
Morning came.  THE END\r\n\
\r\n\
THE END\r\n\
\r\n\
*** END OF THE PROJECT GUTENBERG EBOOK A SMALL TALE ***\r\n\
\r\n\
Updated editions will replace the previous one.\r\n";

/// Bibliographic page in the shape served by gutenberg.org
pub const EBOOK_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Alice's Adventures in Wonderland by Lewis Carroll | Project Gutenberg</title></head>
<body>
<div class="summary-text-container">
  "Alice's Adventures in Wonderland" by Lewis Carroll is a classic children's novel,
  first published in 1865. The story follows a young girl named Alice.
</div>
<table class="bibrec" id="about_book_table">
  <tr><th>Author</th><td><a href="/ebooks/author/7">Carroll, Lewis, 1832-1898</a></td></tr>
  <tr><th>Illustrator</th><td><a href="/ebooks/author/8">Tenniel, John, 1820-1914</a></td></tr>
  <tr><th>Title</th><td>Alice's Adventures in
      Wonderland</td></tr>
  <tr><th>Language</th><td>English</td></tr>
  <tr><th>LoC Class</th><td><a href="/ebooks/loccs/pr">PR: Language and Literatures</a></td></tr>
  <tr><th>Subject</th><td><a class="block" href="/ebooks/subject/1">Fantasy fiction</a></td></tr>
  <tr><th>Subject</th><td><a class="block" href="/ebooks/subject/2">Children's stories</a></td></tr>
  <tr><th>Subject</th><td><a class="block" href="/ebooks/subject/1">Fantasy fiction</a></td></tr>
  <tr><th>Subject</th><td><a class="block" href="/ebooks/subject/3">Imaginary places -- Juvenile fiction</a></td></tr>
  <tr><th>EBook-No.</th><td>11</td></tr>
  <tr><th>Release Date</th><td>Jan 1, 1994</td></tr>
  <tr><td colspan="2">row without a header</td></tr>
</table>
</body>
</html>
"#;
