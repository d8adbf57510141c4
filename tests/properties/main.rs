mod matching_laws;
